use crate::core::session::EditingSession;
use crate::core::AnalysisOutcome;
use crate::utils::error::Result;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// 多執行緒共用同一塊電路板的句柄
///
/// 每次呼叫全程持有唯一的修改鎖
#[derive(Clone, Default)]
pub struct SharedBoard {
    session: Arc<Mutex<EditingSession>>,
}

impl SharedBoard {
    pub fn new(session: EditingSession) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EditingSession> {
        // 編輯操作失敗時不會留下半完成的狀態，所以中毒的鎖可以直接沿用
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn with_session<T>(&self, f: impl FnOnce(&mut EditingSession) -> T) -> T {
        let mut guard = self.lock();
        f(&mut guard)
    }

    pub fn analyze(&self) -> Result<AnalysisOutcome> {
        self.lock().analyze()
    }
}
