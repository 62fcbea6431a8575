use anyhow::Result;
use clap::Args;
use polaroid_core::rotation::{hash_seed, rotation_css, seeded_rotation, RotationSeed};

#[derive(Args)]
pub struct RotationArgs {
    /// Seeds; integers are used directly unless --text is given
    #[arg(required = true)]
    pub seeds: Vec<String>,

    /// Treat every seed as text, even if it looks like a number
    #[arg(long)]
    pub text: bool,
}

pub fn run(args: &RotationArgs) -> Result<()> {
    let width = args.seeds.iter().map(|s| s.len()).max().unwrap_or(0);
    for raw in &args.seeds {
        let seed = match raw.parse::<i64>() {
            Ok(n) if !args.text => RotationSeed::Number(n),
            _ => RotationSeed::Text(raw.clone()),
        };
        let hash = match &seed {
            RotationSeed::Text(text) => i64::from(hash_seed(text)),
            RotationSeed::Number(n) => *n,
        };
        println!(
            "{:<width$}  {:>12}  {}",
            raw,
            hash,
            rotation_css(seeded_rotation(&seed))
        );
    }
    Ok(())
}
