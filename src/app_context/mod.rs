use crate::catalog::Catalog;
use crate::geocoding::ReverseGeocoder;
use crate::storage::interface::ISessionStorage;
use crate::storage::sessions::HashMapSessionsStorage;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContext<SS: ISessionStorage> {
    pub sessions: SS,
    pub catalog: Arc<Catalog>,
    pub geocoder: Arc<dyn ReverseGeocoder>,
    /// Each session writes its records to a sub-folder named after its id.
    pub results_dir: PathBuf,
    /// Rounds sampled for a new session when the client doesn't ask for a number.
    /// `None` plays the whole catalog in order.
    pub rounds_per_game: Option<usize>,
}

pub fn init(
    catalog: Catalog,
    geocoder: Arc<dyn ReverseGeocoder>,
    results_dir: PathBuf,
    rounds_per_game: Option<usize>,
) -> AppContext<HashMapSessionsStorage> {
    AppContext {
        sessions: HashMapSessionsStorage::default(),
        catalog: Arc::new(catalog),
        geocoder,
        results_dir,
        rounds_per_game,
    }
}

pub struct RequestContext {
    pub session_id: String,
}
