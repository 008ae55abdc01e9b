use anyhow::Result;
use clap::Parser;
use pname::utils::validation::Validate;
use pname::{BatchEngine, BatchPipeline, CliConfig, LocalStorage, PnameError};
use tempfile::TempDir;

fn config(dir: &TempDir, args: &[&str]) -> CliConfig {
    let base = dir.path().to_str().unwrap().to_string();
    let mut argv = vec!["pname".to_string()];
    argv.extend(args.iter().map(|a| a.replace("{dir}", &base)));
    CliConfig::parse_from(argv)
}

#[tokio::test]
async fn test_batch_conversion_to_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    tokio::fs::write(
        temp_dir.path().join("names.txt"),
        "customer_name\nOrderDate\n\nship-to-address\n",
    )
    .await?;

    let config = config(
        &temp_dir,
        &[
            "--style",
            "UPPER_CAMEL",
            "--output",
            "{dir}/out/physical.txt",
            "{dir}/names.txt",
        ],
    );
    config.validate()?;

    let pipeline = BatchPipeline::new(LocalStorage::new(".".to_string()), config)?;
    let destination = BatchEngine::new(pipeline).run().await?;
    assert!(destination.ends_with("physical.txt"));

    let output = tokio::fs::read_to_string(temp_dir.path().join("out/physical.txt")).await?;
    assert_eq!(output, "CustomerName\nOrderDate\n\nShipToAddress\n");
    Ok(())
}

#[tokio::test]
async fn test_batch_conversion_with_dictionary_and_desc() -> Result<()> {
    let temp_dir = TempDir::new()?;
    tokio::fs::write(temp_dir.path().join("names.txt"), "cust_no\nqty\n").await?;
    tokio::fs::write(
        temp_dir.path().join("words.tsv"),
        "cust\tcustomer\nno\tnumber\nqty\tquantity\n",
    )
    .await?;

    let config = config(
        &temp_dir,
        &[
            "--style",
            "LOWER_SNAKE",
            "--dictionary",
            "{dir}/words.tsv",
            "--format",
            "tsv",
            "--desc",
            "--output",
            "{dir}/out.tsv",
            "{dir}/names.txt",
        ],
    );
    config.validate()?;

    let pipeline = BatchPipeline::new(LocalStorage::new(".".to_string()), config)?;
    BatchEngine::new(pipeline).run().await?;

    let output = tokio::fs::read_to_string(temp_dir.path().join("out.tsv")).await?;
    assert_eq!(
        output,
        "cust_no\tcustomer_number\tcust=>customer, no=>number\nqty\tquantity\tqty=>quantity\n"
    );
    Ok(())
}

#[tokio::test]
async fn test_batch_conversion_with_headered_dictionary_options() -> Result<()> {
    let temp_dir = TempDir::new()?;
    tokio::fs::write(temp_dir.path().join("names.txt"), "pk_dt\nlogical\n").await?;
    tokio::fs::write(
        temp_dir.path().join("words.txt"),
        "logical\tphysical\npk\tprimary/key\ndt\tdate/time\n",
    )
    .await?;

    let config = config(
        &temp_dir,
        &[
            "--style",
            "UPPER_SNAKE",
            "--dictionary",
            "{dir}/words.txt",
            "--dictionary-format",
            "tsv",
            "--word-delimiter",
            "/",
            "--has-header",
            "--output",
            "{dir}/out.txt",
            "{dir}/names.txt",
        ],
    );
    config.validate()?;

    let pipeline = BatchPipeline::new(LocalStorage::new(".".to_string()), config)?;
    BatchEngine::new(pipeline).run().await?;

    let output = tokio::fs::read_to_string(temp_dir.path().join("out.txt")).await?;
    assert_eq!(output, "PRIMARY_KEY_DATE_TIME\nLOGICAL\n");
    Ok(())
}

#[tokio::test]
async fn test_missing_dictionary_fails_before_reading_input() {
    let temp_dir = TempDir::new().unwrap();
    let config = config(&temp_dir, &["--dictionary", "{dir}/absent.csv"]);

    let result = BatchPipeline::new(LocalStorage::new(".".to_string()), config);
    assert!(matches!(result, Err(PnameError::IoError(_))));
}
