use anyhow::Result;
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;
use treecombo::domain::tree_operations::{count_nodes, max_depth};
use treecombo::io::{generate_flat, generate_random_tree, generate_tree, write_tree, RandomTreeConfig};
use treecombo::utils::format_count;
use treecombo::TreeNode;

/// Shape of the generated tree
enum Shape {
    /// Uniform tree, `breadth` children per node, `depth` levels
    Uniform { depth: usize, breadth: usize },
    /// Flat list of leaves
    Flat { count: usize },
    /// Seeded random tree, optionally with unloaded branches
    Random(RandomTreeConfig),
}

struct Config {
    shape: Shape,
    prefix: String,
    output_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            shape: Shape::Uniform { depth: 3, breadth: 3 },
            prefix: "node".to_string(),
            output_file: "tree.json".to_string(),
        }
    }
}

fn next_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    match args.get(*i) {
        Some(value) => Ok(value),
        None => anyhow::bail!("{} requires an argument", flag),
    }
}

fn parse_args() -> Result<Config> {
    let args: Vec<String> = env::args().collect();
    let mut config = Config::default();

    let mut depth: usize = 3;
    let mut breadth: usize = 3;
    let mut flat: Option<usize> = None;
    let mut random: Option<RandomTreeConfig> = None;
    let mut depth_limit: Option<usize> = None;
    let mut children_limit: Option<usize> = None;
    let mut async_ratio: Option<f64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-depth" => depth = next_value(&args, &mut i, "-depth")?.parse()?,
            "-breadth" => breadth = next_value(&args, &mut i, "-breadth")?.parse()?,
            "-prefix" => config.prefix = next_value(&args, &mut i, "-prefix")?.to_string(),
            "-flat" => flat = Some(next_value(&args, &mut i, "-flat")?.parse()?),
            "-random" => {
                let seed: u64 = next_value(&args, &mut i, "-random")?.parse()?;
                random = Some(RandomTreeConfig { seed, ..Default::default() });
            }
            "-max_depth" => depth_limit = Some(next_value(&args, &mut i, "-max_depth")?.parse()?),
            "-max_children" => {
                children_limit = Some(next_value(&args, &mut i, "-max_children")?.parse()?)
            }
            "-async_ratio" => {
                let ratio: f64 = next_value(&args, &mut i, "-async_ratio")?.parse()?;
                if !(0.0..=1.0).contains(&ratio) {
                    anyhow::bail!("-async_ratio must be between 0 and 1, got {}", ratio);
                }
                async_ratio = Some(ratio);
            }
            "-out" => config.output_file = next_value(&args, &mut i, "-out")?.to_string(),
            "-h" | "-help" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                eprintln!("Warning: Unknown argument: {}", other);
            }
        }
        i += 1;
    }

    config.shape = match (flat, random) {
        (Some(_), Some(_)) => anyhow::bail!("-flat and -random are mutually exclusive"),
        (Some(count), None) => Shape::Flat { count },
        (None, Some(mut random)) => {
            if let Some(limit) = depth_limit {
                random.max_depth = limit;
            }
            if let Some(limit) = children_limit {
                random.max_children = limit;
            }
            if let Some(async_ratio) = async_ratio {
                random.async_ratio = async_ratio;
            }
            Shape::Random(random)
        }
        (None, None) => Shape::Uniform { depth, breadth },
    };

    Ok(config)
}

fn print_help() {
    println!("Tree Data Generator");
    println!("Usage: treecombo-gen [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -depth <N>             Levels of a uniform tree (default: 3)");
    println!("  -breadth <N>           Children per node of a uniform tree (default: 3)");
    println!("  -prefix <S>            Id prefix of a uniform tree (default: node)");
    println!("  -flat <N>              Generate N flat items instead");
    println!("  -random <SEED>         Generate a seeded random tree instead");
    println!("  -max_depth <N>         Random tree depth limit (default: 4)");
    println!("  -max_children <N>      Random tree fan-out limit (default: 8)");
    println!("  -async_ratio <F>       Share of random branches left unloaded, 0..1 (default: 0)");
    println!("  -out <FILE>            Output file path (default: tree.json)");
    println!("                         A .br suffix writes a Brotli-compressed file");
    println!("  -h, -help, --help      Show this help message");
}

fn generate(config: &Config) -> Vec<TreeNode> {
    match &config.shape {
        Shape::Uniform { depth, breadth } => generate_tree(*depth, *breadth, &config.prefix),
        Shape::Flat { count } => generate_flat(*count),
        Shape::Random(random) => generate_random_tree(random),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = parse_args()?;
    let roots = generate(&config);

    write_tree(&config.output_file, &roots)?;

    info!(
        path = config.output_file.as_str(),
        roots = roots.len(),
        "tree written"
    );
    println!(
        "Tree written to: {} ({} nodes, {} levels)",
        config.output_file,
        format_count(count_nodes(&roots)),
        if roots.is_empty() { 0 } else { max_depth(&roots) + 1 }
    );

    Ok(())
}
