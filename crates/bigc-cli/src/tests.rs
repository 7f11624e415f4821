use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["bigc-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn scrape_without_flags_uses_config_defaults() {
    let cli = Cli::try_parse_from(["bigc-cli", "scrape"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Scrape {
            output: None,
            categories: None,
            ref category,
            dry_run: false,
        }) if category.is_empty()
    ));
}

#[test]
fn scrape_accepts_output_and_categories_paths() {
    let cli = Cli::try_parse_from([
        "bigc-cli",
        "scrape",
        "--output",
        "out/bigc.json",
        "--categories",
        "config/alt.yaml",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Scrape {
        output, categories, ..
    }) = cli.command
    else {
        panic!("expected scrape command");
    };
    assert_eq!(output, Some(PathBuf::from("out/bigc.json")));
    assert_eq!(categories, Some(PathBuf::from("config/alt.yaml")));
}

#[test]
fn category_flag_is_repeatable() {
    let cli = Cli::try_parse_from([
        "bigc-cli",
        "scrape",
        "--category",
        "beverages",
        "--category",
        "grocery-bakery",
        "--dry-run",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Scrape {
        category, dry_run, ..
    }) = cli.command
    else {
        panic!("expected scrape command");
    };
    assert_eq!(category, vec!["beverages", "grocery-bakery"]);
    assert!(dry_run);
}

#[test]
fn short_output_flag() {
    let cli = Cli::try_parse_from(["bigc-cli", "scrape", "-o", "snap.json"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Scrape { output: Some(ref p), .. }) if p == &PathBuf::from("snap.json")
    ));
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["bigc-cli", "collect"]).is_err());
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}
