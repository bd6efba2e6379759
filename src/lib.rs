pub mod app;
pub mod assets;
pub mod carousel;
pub mod config;
pub mod contact;
pub mod gallery;
pub mod ipc;
pub mod page;
pub mod paths;
pub mod placeholder;
pub mod portfolio;
pub mod view;
pub mod watch;
