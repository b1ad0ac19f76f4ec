pub mod app;
mod board;
mod dialogs;
mod rendering;
mod resources;
