use garde::Validate as _;
use mvs_dal::movie::{CreateMovie, DEFAULT_RATE, Genre, MovieRepository, UpdateMovie};

fn matrix() -> CreateMovie {
    CreateMovie {
        title: "The Matrix".to_string(),
        year: 1999,
        director: "Lana Wachowski".to_string(),
        duration: 136.0,
        rate: Some(8.7),
        poster: "https://example.com/posters/matrix.jpg".to_string(),
        genre: vec![Genre::Action, Genre::SciFi],
    }
}

fn gladiator() -> CreateMovie {
    CreateMovie {
        title: "Gladiator".to_string(),
        year: 2000,
        director: "Ridley Scott".to_string(),
        duration: 155.0,
        rate: None,
        poster: "https://example.com/posters/gladiator.jpg".to_string(),
        genre: vec![Genre::Action, Genre::Drama],
    }
}

#[test]
fn test_create_assigns_id_and_default_rate() {
    let repo = MovieRepository::new();

    let first = repo.create(matrix());
    assert!(!first.id.is_empty());
    assert_eq!(first.rate, 8.7);
    assert_eq!(first.title, "The Matrix");

    let second = repo.create(gladiator());
    assert!(!second.id.is_empty());
    assert_ne!(first.id, second.id);
    assert_eq!(second.rate, DEFAULT_RATE);

    assert_eq!(repo.count(), 2);
}

#[test]
fn test_get() {
    let repo = MovieRepository::new();
    let stored = repo.create(matrix());

    let found = repo.get(&stored.id).unwrap();
    assert_eq!(found.id, stored.id);
    assert_eq!(found.director, "Lana Wachowski");

    let missing = repo.get("no-such-id");
    assert!(matches!(missing, Err(mvs_dal::Error::RecordNotFound(_))));
}

#[test]
fn test_list_keeps_insertion_order() {
    let repo = MovieRepository::new();
    let first = repo.create(matrix());
    let second = repo.create(gladiator());

    let all = repo.list(None);
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, first.id);
    assert_eq!(all[1].id, second.id);
}

#[test]
fn test_list_filters_genre_case_insensitive() {
    let repo = MovieRepository::new();
    repo.create(matrix());
    repo.create(gladiator());

    let sci_fi = repo.list(Some("sci-fi"));
    assert_eq!(sci_fi.len(), 1);
    assert_eq!(sci_fi[0].title, "The Matrix");

    let action = repo.list(Some("ACTION"));
    assert_eq!(action.len(), 2);

    let unknown = repo.list(Some("Western"));
    assert!(unknown.is_empty());
}

#[test]
fn test_update_overwrites_only_supplied_fields() {
    let repo = MovieRepository::new();
    let first = repo.create(matrix());
    repo.create(gladiator());

    let payload = UpdateMovie {
        year: Some(2020),
        ..UpdateMovie::default()
    };
    let updated = repo.update(&first.id, payload).unwrap();
    assert_eq!(updated.id, first.id);
    assert_eq!(updated.year, 2020);
    assert_eq!(updated.title, first.title);
    assert_eq!(updated.rate, first.rate);
    assert_eq!(updated.genre, first.genre);

    // the record stays at its original position
    let all = repo.list(None);
    assert_eq!(all[0].id, first.id);
    assert_eq!(all[0].year, 2020);
}

#[test]
fn test_update_missing_record() {
    let repo = MovieRepository::new();
    repo.create(matrix());

    let payload = UpdateMovie {
        year: Some(2020),
        ..UpdateMovie::default()
    };
    let result = repo.update("no-such-id", payload);
    assert!(matches!(result, Err(mvs_dal::Error::RecordNotFound(_))));
    assert_eq!(repo.list(None)[0].year, 1999);
}

#[test]
fn test_delete_preserves_order_of_rest() {
    let repo = MovieRepository::new();
    let first = repo.create(matrix());
    let second = repo.create(gladiator());
    let third = repo.create(CreateMovie {
        title: "Alien".to_string(),
        year: 1979,
        director: "Ridley Scott".to_string(),
        duration: 117.0,
        rate: Some(8.5),
        poster: "https://example.com/posters/alien.jpg".to_string(),
        genre: vec![Genre::Horror, Genre::SciFi],
    });

    repo.delete(&second.id).unwrap();
    let all = repo.list(None);
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, first.id);
    assert_eq!(all[1].id, third.id);

    let repeated = repo.delete(&second.id);
    assert!(matches!(repeated, Err(mvs_dal::Error::RecordNotFound(_))));
    assert_eq!(repo.count(), 2);
}

#[test]
fn test_create_payload_validation() {
    assert!(matrix().validate().is_ok());

    let mut payload = matrix();
    payload.title = String::new();
    assert!(payload.validate().is_err());

    let mut payload = matrix();
    payload.year = 1800;
    assert!(payload.validate().is_err());

    let mut payload = matrix();
    payload.duration = 0.0;
    assert!(payload.validate().is_err());

    let mut payload = matrix();
    payload.rate = Some(25.0);
    assert!(payload.validate().is_err());

    let mut payload = matrix();
    payload.poster = "not a url".to_string();
    assert!(payload.validate().is_err());

    let mut payload = matrix();
    payload.genre = vec![];
    assert!(payload.validate().is_err());
}

#[test]
fn test_update_payload_validation() {
    let empty = UpdateMovie::default();
    assert!(empty.validate().is_ok());

    let year_only = UpdateMovie {
        year: Some(2020),
        ..UpdateMovie::default()
    };
    assert!(year_only.validate().is_ok());

    let bad_rate = UpdateMovie {
        rate: Some(25.0),
        ..UpdateMovie::default()
    };
    assert!(bad_rate.validate().is_err());

    let empty_genre = UpdateMovie {
        genre: Some(vec![]),
        ..UpdateMovie::default()
    };
    assert!(empty_genre.validate().is_err());
}

#[test]
fn test_genre_json_spelling() {
    let parsed: Genre = serde_json::from_str("\"Sci-Fi\"").unwrap();
    assert_eq!(parsed, Genre::SciFi);
    assert_eq!(serde_json::to_string(&Genre::SciFi).unwrap(), "\"Sci-Fi\"");

    let unknown: Result<Genre, _> = serde_json::from_str("\"Western\"");
    assert!(unknown.is_err());
}

#[test]
fn test_payload_ignores_unknown_keys() {
    // a client supplied id must not reach the record
    let payload: UpdateMovie =
        serde_json::from_str(r#"{"id":"forged","year":2020}"#).unwrap();
    assert_eq!(payload.year, Some(2020));

    let repo = MovieRepository::new();
    let stored = repo.create(matrix());
    let updated = repo.update(&stored.id, payload).unwrap();
    assert_eq!(updated.id, stored.id);
}
