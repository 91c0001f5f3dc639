use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, PoisonError},
};

use futures_util::lock::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::UserID;

/// Mutual exclusion of operations on the data of the same user.
///
/// Operations for different users never wait for each other.
#[derive(Debug, Default)]
pub struct UserLocks {
    locks: Mutex<BTreeMap<UserID, Arc<AsyncMutex<()>>>>,
}

pub type UserGuard = OwnedMutexGuard<()>;

impl UserLocks {
    pub async fn lock(&self, user_id: UserID) -> UserGuard {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.retain(|id, lock| *id == user_id || Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(user_id).or_default())
        };
        lock.lock_owned().await
    }
}
