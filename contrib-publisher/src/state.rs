use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use contrib_core::CorrelationId;

/// Статус авторизации по correlation id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AuthorizationStatus {
    Waiting,
    Authorized,
    Failed,
}

struct Inner {
    authorization: HashMap<CorrelationId, AuthorizationStatus>,
    running: bool,
}

/// Общее состояние оркестратора и потока доставки событий.
///
/// Один mutex на всё; держим его только на время чтения/записи.
pub(crate) struct SharedState {
    inner: Mutex<Inner>,
}

impl SharedState {
    pub(crate) fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                authorization: HashMap::new(),
                running: true,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        match self.inner.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(), // продолжаем, несмотря на poison
        }
    }

    /// Завести запись `Waiting` под новый запрос
    pub(crate) fn begin_authorization(&self, cid: CorrelationId) {
        self.lock()
            .authorization
            .insert(cid, AuthorizationStatus::Waiting);
    }

    /// Перевести запись в терминальное состояние.
    ///
    /// Срабатывает только из `Waiting`; возвращает `true`, если переход был.
    pub(crate) fn resolve_authorization(&self, cid: &CorrelationId, authorized: bool) -> bool {
        let mut inner = self.lock();
        match inner.authorization.get_mut(cid) {
            Some(status) if *status == AuthorizationStatus::Waiting => {
                *status = if authorized {
                    AuthorizationStatus::Authorized
                } else {
                    AuthorizationStatus::Failed
                };
                true
            }
            _ => false,
        }
    }

    pub(crate) fn authorization_status(&self, cid: &CorrelationId) -> Option<AuthorizationStatus> {
        self.lock().authorization.get(cid).copied()
    }

    /// Убрать запись после того, как ожидание завершилось
    pub(crate) fn forget_authorization(&self, cid: &CorrelationId) {
        self.lock().authorization.remove(cid);
    }

    pub(crate) fn is_running(&self) -> bool {
        self.lock().running
    }

    pub(crate) fn stop_running(&self) {
        self.lock().running = false;
    }
}
