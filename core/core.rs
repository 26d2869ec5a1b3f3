pub mod config;
pub mod error;
pub mod matcher;
pub mod render;
pub mod report;
pub mod settings;
pub mod tree;

pub use config::{ProjectConfig, load_gitignore, normalize_path};
pub use error::{AppError, Result};
pub use matcher::Matcher;
pub use render::{ContentMap, extract_file_contents, render};
pub use report::{Report, assemble, generate_report};
pub use settings::{Defaults, SettingsStore};
pub use tree::{DirectoryNode, FileNode, Node, build};
