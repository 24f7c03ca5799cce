use std::ops::Deref;

use contrib_core::Session;
use log::info;

/// Владеет сессией и останавливает её при выходе из области видимости,
/// в том числе при ошибке или панике.
pub(crate) struct SessionGuard<S: Session> {
    session: S,
}

impl<S: Session> SessionGuard<S> {
    pub(crate) fn new(session: S) -> Self {
        Self { session }
    }
}

impl<S: Session> Deref for SessionGuard<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.session
    }
}

impl<S: Session> Drop for SessionGuard<S> {
    fn drop(&mut self) {
        info!("stopping session");
        self.session.stop();
    }
}
