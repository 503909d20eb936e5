use cdx_merge::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock OutputPresenter that captures everything presented
#[derive(Default, Clone)]
pub struct MockOutputPresenter {
    pub presented: Arc<Mutex<Vec<String>>>,
}

impl MockOutputPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn presented(&self) -> Vec<String> {
        self.presented.lock().unwrap().clone()
    }
}

impl OutputPresenter for MockOutputPresenter {
    fn present(&self, content: &str) -> Result<()> {
        self.presented.lock().unwrap().push(content.to_string());
        Ok(())
    }
}
