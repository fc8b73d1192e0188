use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 探索の協調的キャンセル用フラグ。クローンは同じフラグを共有する。
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_canceled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_flag() {
        let token = CancelToken::new();
        let remote = token.clone();
        assert!(!token.is_canceled());
        remote.cancel();
        assert!(token.is_canceled());
        token.reset();
        assert!(!remote.is_canceled());
    }
}
