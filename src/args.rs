use anyhow::{Context, Result, bail};
use clap::{Args as ClapArgs, Parser, Subcommand};
use seo_manifest::BuildConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "seo-manifest")]
#[command(about = "Builds and validates SEO manifests for static HTML sites")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract page metadata from a site directory into an NDJSON manifest
    Build(BuildArgs),
    /// Check a manifest for structural and SEO problems
    Validate(ValidateArgs),
}

#[derive(ClapArgs, Debug)]
pub struct BuildArgs {
    /// Root directory of the static site
    pub root: Option<PathBuf>,

    /// Site domain used to classify links (e.g. example.com)
    #[arg(short, long)]
    pub domain: Option<String>,

    /// JSON configuration file; command-line flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the manifest here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of pages extracted concurrently
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// Page file extension (repeatable, replaces the default `htm`)
    #[arg(long = "ext")]
    pub extensions: Vec<String>,

    /// Regex for site paths to skip (repeatable)
    #[arg(long = "exclude")]
    pub exclude: Vec<String>,

    /// Leave raw markup out of page records
    #[arg(long)]
    pub no_content_html: bool,
}

#[derive(ClapArgs, Debug)]
pub struct ValidateArgs {
    /// Manifest to check
    #[arg(default_value = "seo-manifest.ndjson")]
    pub manifest: PathBuf,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Exit with status 1 when any non-warning issue is found
    #[arg(long)]
    pub strict: bool,
}

/// Merge the config file (if any) with command-line overrides
pub fn build_config(args: &BuildArgs) -> Result<BuildConfig> {
    let mut config = match (&args.config, &args.root, &args.domain) {
        (Some(path), _, _) => BuildConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        (None, Some(root), Some(domain)) => BuildConfig::new(root, domain),
        (None, None, _) => bail!("a site root is required unless --config is given"),
        (None, _, None) => bail!("--domain is required unless --config is given"),
    };

    if let Some(root) = &args.root {
        config.root_dir = root.clone();
    }
    if let Some(domain) = &args.domain {
        config.site.domain = domain.clone();
    }
    if let Some(concurrency) = args.concurrency {
        config.max_concurrency = concurrency;
    }
    if !args.extensions.is_empty() {
        config.extensions = args.extensions.clone();
    }
    config.exclude_patterns.extend(args.exclude.iter().cloned());
    if args.no_content_html {
        config.include_content_html = false;
    }

    Ok(config)
}
