//! UI layer for the predictor window: app shell, panels and input widgets.

pub mod app;
pub mod panels;
pub mod widgets;

pub use app::PredictorApp;
