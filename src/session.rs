use crate::storage::{LocalStorage, SESSION_ID_KEY};
use chrono::Utc;
use rand::Rng;
use tracing::{debug, warn};

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_LEN: usize = 9;

/// Return the visitor's session id, generating and persisting one on first use.
///
/// The id is only a key for anonymous preferences, never a credential.
/// If the id cannot be persisted it is still returned; the next reload will
/// then mint a new one.
pub fn get_or_create_session_id(storage: &LocalStorage) -> String {
    if let Some(existing) = storage.get_item(SESSION_ID_KEY).filter(|s| !s.is_empty()) {
        return existing;
    }

    let session_id = generate_session_id();
    debug!("Generated new session id {}", session_id);

    if let Err(e) = storage.set_item(SESSION_ID_KEY, &session_id) {
        warn!("Failed to persist session id: {}", e);
    }

    session_id
}

/// `session_<9 random base-36 chars>_<unix millis>`
fn generate_session_id() -> String {
    let mut rng = rand::thread_rng();
    let random: String = (0..RANDOM_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();

    format!("session_{}_{}", random, Utc::now().timestamp_millis())
}
