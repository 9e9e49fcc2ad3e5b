use std::sync::Arc;

use mvs_dal::movie::MovieRepository;

#[derive(Clone)]
pub struct AppState {
    state: Arc<AppStateInner>,
}

impl AppState {
    pub fn new(repository: MovieRepository) -> Self {
        AppState {
            state: Arc::new(AppStateInner { repository }),
        }
    }

    pub fn repository(&self) -> &MovieRepository {
        &self.state.repository
    }
}

struct AppStateInner {
    repository: MovieRepository,
}
