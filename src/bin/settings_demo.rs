use talait::settings::*;

fn main() -> anyhow::Result<()> {
    // $ cargo run --bin settings_demo -- --settings=settings/release.toml
    let cli = Cli::parse();
    let project_settings = parse_settings(cli.settings.as_deref())?;
    println!("store backend:     {}", project_settings.store.backend);
    println!("translate backend: {}", project_settings.translate.backend);
    println!("listen address:    {}", project_settings.http.address);
    println!("token lifetime:    {}s", project_settings.auth.token_ttl_secs);

    // env overrides win over the file, e.g. TALAIT__HTTP__ADDRESS=0.0.0.0:9000
    let is_err = parse_settings(Some("settings/missing.toml")).is_err();
    println!("error on missing file: {:?}", is_err);

    Ok(())
}
