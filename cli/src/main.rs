//! dashgate CLI - inspect and query dashboard RBAC policy files

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use console::Style;
use dashgate_core::{
    default_policy_path, load_policy_config, save_policy_config,
    rbac::{Authorizer, Feature, Permission, RbacConfig, Role},
};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// dashgate - dashboard access control
#[derive(Parser, Debug)]
#[command(name = "dashgate")]
#[command(version)]
#[command(about = "Query dashboard role policies", long_about = None)]
struct Cli {
    /// Policy file (defaults to $DASHGATE_POLICY or ~/.dashgate/policy.json)
    #[arg(short, long, global = true)]
    policy: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a policy file with every role present and no grants
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Validate the policy file
    Validate,

    /// Check whether a role holds a permission
    Check {
        /// Role name
        role: String,
        /// Permission id, e.g. projects.create
        permission: String,
    },

    /// Show capability bundles of a role for every feature
    Features {
        /// Role name
        role: String,
    },

    /// List the permissions granted to a role
    Permissions {
        /// Role name
        role: String,
    },

    /// List every role and permission in the catalog
    Catalog,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::builder().parse("debug")?
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let policy_path = cli.policy.unwrap_or_else(default_policy_path);

    match cli.command {
        Commands::Init { force } => {
            command_init(policy_path, force).await?;
        }
        Commands::Validate => {
            command_validate(policy_path).await?;
        }
        Commands::Check { role, permission } => {
            command_check(policy_path, &role, &permission).await?;
        }
        Commands::Features { role } => {
            command_features(policy_path, &role).await?;
        }
        Commands::Permissions { role } => {
            command_permissions(policy_path, &role).await?;
        }
        Commands::Catalog => {
            command_catalog();
        }
    }

    Ok(())
}

async fn load_authorizer(path: &Path) -> Result<Authorizer> {
    let config = load_policy_config(path)
        .await
        .with_context(|| format!("Failed to load policy from {}", path.display()))?;
    Ok(Authorizer::new(&config)?)
}

/// Styled yes/no cell, padded before styling so columns line up.
fn mark(allowed: bool) -> String {
    if allowed {
        Style::new().green().apply_to(format!("{:<7}", "yes")).to_string()
    } else {
        Style::new().red().apply_to(format!("{:<7}", "no")).to_string()
    }
}

/// Write an empty policy template
async fn command_init(path: PathBuf, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("Policy already exists at {} (use --force to overwrite)", path.display());
    }

    let config = Role::ALL
        .into_iter()
        .fold(RbacConfig::default(), |config, role| {
            config.with_role(role, Vec::<String>::new())
        });
    save_policy_config(&path, &config).await?;

    println!(
        "{} Wrote policy template to {}",
        Style::new().green().apply_to("✓"),
        path.display()
    );
    Ok(())
}

async fn command_validate(path: PathBuf) -> Result<()> {
    let authorizer = load_authorizer(&path).await?;
    let table = authorizer.snapshot();

    println!("{} {} is valid", Style::new().green().apply_to("✓"), path.display());
    for role in Role::ALL {
        println!("  {:<8} {} permissions", role, table.permissions_for(role).len());
    }
    Ok(())
}

async fn command_check(path: PathBuf, role: &str, permission: &str) -> Result<()> {
    let authorizer = load_authorizer(&path).await?;
    let allowed = authorizer.authorize(role, permission)?;
    println!("{} {} {}", role, permission, mark(allowed));
    Ok(())
}

async fn command_features(path: PathBuf, role: &str) -> Result<()> {
    let authorizer = load_authorizer(&path).await?;
    let ctx = authorizer.context(role)?;
    let dim = Style::new().dim();

    println!(
        "{}",
        dim.apply_to(format!(
            "{:<10} {:<7} {:<7} {:<7} {:<7}",
            "feature", "create", "edit", "delete", "export"
        ))
    );
    for feature in Feature::ALL {
        let bundle = ctx.feature_access(feature);
        println!(
            "{:<10} {} {} {} {}",
            feature,
            mark(bundle.can_create),
            mark(bundle.can_edit),
            mark(bundle.can_delete),
            mark(bundle.can_export)
        );
    }
    Ok(())
}

async fn command_permissions(path: PathBuf, role: &str) -> Result<()> {
    let authorizer = load_authorizer(&path).await?;
    let ctx = authorizer.context(role)?;

    let mut tags = Vec::new();
    if ctx.is_admin() {
        tags.push("admin class");
    }
    if ctx.is_partner() {
        tags.push("partner class");
    }
    if tags.is_empty() {
        println!("{}", Style::new().cyan().apply_to(ctx.role()));
    } else {
        println!("{} ({})", Style::new().cyan().apply_to(ctx.role()), tags.join(", "));
    }

    if ctx.all_permissions().is_empty() {
        println!("  (no permissions)");
    }
    for permission in ctx.all_permissions() {
        println!("  {}", permission);
    }
    Ok(())
}

fn command_catalog() {
    let cyan = Style::new().cyan();

    println!("{}", cyan.apply_to("Roles"));
    for role in Role::ALL {
        println!("  {}", role);
    }

    println!("{}", cyan.apply_to("Permissions"));
    for feature in Feature::ALL {
        let ids: Vec<&str> = feature.permissions().map(|p: Permission| p.as_str()).collect();
        println!("  {:<10} {}", feature, ids.join(" "));
    }
}
