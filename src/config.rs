use std::path::PathBuf;

/// Returns the path to the data directory for element-lsp.
/// Uses $XDG_DATA_HOME/element-lsp if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/element-lsp,
/// or ./element-lsp if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
///
/// Logging goes to a file because stdout carries the LSP channel.
pub fn log_path() -> PathBuf {
    data_dir().join("element-lsp.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("element-lsp")
}
