//! Shared application state for resource routes.

use crate::store::ResourceRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ResourceRepository>,
}

impl AppState {
    pub fn new(store: Arc<dyn ResourceRepository>) -> Self {
        AppState { store }
    }
}
