use std::fmt;
use std::sync::{Arc, RwLock};

use garde::Validate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{Error, error::Result};

/// Rate assigned to a movie when the payload does not provide one.
pub const DEFAULT_RATE: f64 = 5.0;

/// Closed set of genres a movie can be tagged with.
///
/// JSON spelling is the variant name, except `Sci-Fi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Adventure,
    Comedy,
    Drama,
    Fantasy,
    Horror,
    Thriller,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Romance,
    Crime,
}

impl Genre {
    pub fn as_str(self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Comedy => "Comedy",
            Genre::Drama => "Drama",
            Genre::Fantasy => "Fantasy",
            Genre::Horror => "Horror",
            Genre::Thriller => "Thriller",
            Genre::SciFi => "Sci-Fi",
            Genre::Romance => "Romance",
            Genre::Crime => "Crime",
        }
    }

    /// Case-insensitive name comparison, used by the listing filter.
    pub fn matches(self, name: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(name)
    }
}

impl AsRef<str> for Genre {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub director: String,
    pub duration: f64,
    pub rate: f64,
    pub poster: String,
    pub genre: Vec<Genre>,
}

impl Movie {
    fn from_create(payload: CreateMovie) -> Self {
        Movie {
            id: Uuid::new_v4().to_string(),
            title: payload.title,
            year: payload.year,
            director: payload.director,
            duration: payload.duration,
            rate: payload.rate.unwrap_or(DEFAULT_RATE),
            poster: payload.poster,
            genre: payload.genre,
        }
    }

    // Overwrites supplied fields only, id stays as is.
    fn apply(&mut self, payload: UpdateMovie) {
        if let Some(title) = payload.title {
            self.title = title;
        }
        if let Some(year) = payload.year {
            self.year = year;
        }
        if let Some(director) = payload.director {
            self.director = director;
        }
        if let Some(duration) = payload.duration {
            self.duration = duration;
        }
        if let Some(rate) = payload.rate {
            self.rate = rate;
        }
        if let Some(poster) = payload.poster {
            self.poster = poster;
        }
        if let Some(genre) = payload.genre {
            self.genre = genre;
        }
    }
}

fn positive(value: &f64, _context: &()) -> garde::Result {
    if *value > 0.0 {
        Ok(())
    } else {
        Err(garde::Error::new("must be greater than 0"))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct CreateMovie {
    #[garde(length(min = 1, max = 511))]
    pub title: String,
    #[garde(range(min = 1900, max = 2025))]
    pub year: i32,
    #[garde(skip)]
    pub director: String,
    #[garde(custom(positive))]
    pub duration: f64,
    #[garde(range(min = 0.0, max = 20.0))]
    pub rate: Option<f64>,
    #[garde(url)]
    pub poster: String,
    #[garde(length(min = 1))]
    pub genre: Vec<Genre>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, Validate)]
pub struct UpdateMovie {
    #[garde(length(min = 1, max = 511))]
    pub title: Option<String>,
    #[garde(range(min = 1900, max = 2025))]
    pub year: Option<i32>,
    #[garde(skip)]
    pub director: Option<String>,
    #[garde(inner(custom(positive)))]
    pub duration: Option<f64>,
    #[garde(range(min = 0.0, max = 20.0))]
    pub rate: Option<f64>,
    #[garde(url)]
    pub poster: Option<String>,
    #[garde(length(min = 1))]
    pub genre: Option<Vec<Genre>>,
}

/// Shared in-memory movie collection.
///
/// Clones share the same underlying sequence, which keeps insertion order.
/// Reads and writes are serialized on a single lock, so concurrent request
/// handlers cannot observe a partially applied mutation.
#[derive(Debug, Clone, Default)]
pub struct MovieRepository {
    movies: Arc<RwLock<Vec<Movie>>>,
}

impl MovieRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movies(movies: Vec<Movie>) -> Self {
        Self {
            movies: Arc::new(RwLock::new(movies)),
        }
    }

    pub fn list(&self, genre: Option<&str>) -> Vec<Movie> {
        let movies = self.movies.read().expect("movies lock poisoned");
        match genre {
            Some(name) => movies
                .iter()
                .filter(|movie| movie.genre.iter().any(|g| g.matches(name)))
                .cloned()
                .collect(),
            None => movies.clone(),
        }
    }

    pub fn get(&self, id: &str) -> Result<Movie> {
        let movies = self.movies.read().expect("movies lock poisoned");
        movies
            .iter()
            .find(|movie| movie.id == id)
            .cloned()
            .ok_or_else(|| Error::RecordNotFound("Movie".to_string()))
    }

    pub fn create(&self, payload: CreateMovie) -> Movie {
        let movie = Movie::from_create(payload);
        debug!("Storing movie {}", movie.id);
        let mut movies = self.movies.write().expect("movies lock poisoned");
        movies.push(movie.clone());
        movie
    }

    pub fn update(&self, id: &str, payload: UpdateMovie) -> Result<Movie> {
        let mut movies = self.movies.write().expect("movies lock poisoned");
        let movie = movies
            .iter_mut()
            .find(|movie| movie.id == id)
            .ok_or_else(|| Error::RecordNotFound("Movie".to_string()))?;
        movie.apply(payload);
        Ok(movie.clone())
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        let mut movies = self.movies.write().expect("movies lock poisoned");
        let index = movies
            .iter()
            .position(|movie| movie.id == id)
            .ok_or_else(|| Error::RecordNotFound("Movie".to_string()))?;
        movies.remove(index);
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.movies.read().expect("movies lock poisoned").len()
    }
}
