use super::Parser;

#[derive(Parser, Debug)]
#[command(name = "talait", about = "Authenticated translation gateway")]
pub struct Cli {
    /// Path to a settings TOML file.
    #[arg(long)]
    pub settings: Option<String>,
}
