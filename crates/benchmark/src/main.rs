//! Shipment Benchmark Runner CLI

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use u_shipping_benchmark::{BenchmarkConfig, BenchmarkRunner, DatasetParser};
use u_shipping_binpack::{bundle, max_stack_factor};
use u_shipping_core::{BundleConfig, Package};

#[derive(Parser)]
#[command(name = "bench-runner")]
#[command(about = "Shipment Benchmark Runner for U-Shipping")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack every shipment of a dataset file (one shipment per line)
    Run {
        /// Path to the dataset file
        file: PathBuf,

        /// Container size
        #[arg(short, long, default_value = "600x400x400")]
        container: Package,

        /// Rotation search budget per shipment
        #[arg(short, long, default_value = "5000")]
        budget: u64,

        /// Shuffle seed
        #[arg(short, long, default_value = "1")]
        seed: u64,

        /// Only run the first N shipments
        #[arg(short, long)]
        limit: Option<usize>,

        /// Use the parallel rotation search
        #[arg(short, long)]
        parallel: bool,

        /// Bundle cartons before packing
        #[arg(long)]
        bundle: bool,

        #[command(flatten)]
        limits: LimitArgs,

        /// Output file for results (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output file for CSV results
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Bundle cartons given on the command line
    Bundle {
        /// Cartons as HxWxL, optionally followed by a weight (e.g. "800x310x250 7400g")
        #[arg(required = true)]
        packages: Vec<Package>,

        #[command(flatten)]
        limits: LimitArgs,
    },

    /// Show how many copies of a carton fit into one bundle
    Stack {
        /// Carton as HxWxL, optionally followed by a weight
        package: Package,

        #[command(flatten)]
        limits: LimitArgs,
    },
}

/// Bundling limits.
#[derive(Args)]
struct LimitArgs {
    /// Maximum bundle weight in grams
    #[arg(long, default_value = "31000")]
    max_weight: u32,

    /// Maximum bundle girth
    #[arg(long, default_value = "3000")]
    max_girth: u64,

    /// Maximum cartons per bundle
    #[arg(long, default_value = "6")]
    max_items: usize,
}

impl From<&LimitArgs> for BundleConfig {
    fn from(args: &LimitArgs) -> Self {
        BundleConfig::new()
            .with_max_weight(args.max_weight)
            .with_max_girth(args.max_girth)
            .with_max_items_per_bundle(args.max_items)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            file,
            container,
            budget,
            seed,
            limit,
            parallel,
            bundle: bundling,
            limits,
            output,
            csv,
        } => {
            let parser = DatasetParser::new();
            let mut dataset = parser.parse_file(&file)?;
            if let Some(limit) = limit {
                dataset.truncate(limit);
            }

            println!(
                "Packing {} shipments ({} cartons) from {}",
                dataset.shipments.len(),
                dataset.package_count(),
                file.display()
            );

            let config = BenchmarkConfig::new()
                .with_container(container)
                .with_iteration_budget(budget)
                .with_seed(seed)
                .with_parallel(parallel)
                .with_bundling(bundling.then(|| BundleConfig::from(&limits)));

            let runner = BenchmarkRunner::new(config);
            let results = runner.run_dataset(&dataset)?;

            results.print_summary();

            if let Some(path) = output {
                results.save_json(&path)?;
                println!("Results saved to: {}", path.display());
            }

            if let Some(path) = csv {
                results.save_csv(&path)?;
                println!("CSV saved to: {}", path.display());
            }
        }

        Commands::Bundle { packages, limits } => {
            let config = BundleConfig::from(&limits);
            config.validate()?;
            let result = bundle(&packages, &config);

            println!("Bundles: {}", result.bundle_count);
            for package in &result.merged {
                println!("  merged   {} (girth {})", package, package.girth());
            }
            for package in &result.unmerged {
                println!("  single   {} (girth {})", package, package.girth());
            }
        }

        Commands::Stack { package, limits } => {
            let config = BundleConfig::from(&limits);
            let factor = max_stack_factor(&package, &config);
            println!("{} x {}", factor, package);
            if factor > 0 {
                let stack = package.stacked(factor)?;
                println!(
                    "  bundle {} (girth {}, weight {}g)",
                    stack,
                    stack.girth(),
                    stack.weight()
                );
            }
        }
    }

    Ok(())
}
