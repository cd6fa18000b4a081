//! Membership demo.
//!
//! Commits to random 128-bit leaves, checks one opening off-domain, then
//! proves and verifies membership of that leaf through the constraint
//! backend.  Prints a JSON report on stdout.
//!
//! Built only with the `cli` feature.
//!
//! Usage:
//!   cargo run --features cli --bin membership_demo -- --leaves 16 --seed 7
//!   membership_demo --profile bn254-poseidon --index 3
//!   membership_demo --config params.json --tamper

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rpp_merkle::field::FieldElement;
use rpp_merkle::hash::FieldHasher;
use rpp_merkle::membership::{verify_opening, Verdict};
use rpp_merkle::merkle::MerkleTree;
use rpp_merkle::params::{params_hash, BuiltinProfile, MembershipParams, MembershipParamsBuilder};
use rpp_merkle::proof::{prove_membership, verify_membership};
use rpp_merkle::utils::set_parallelism;

#[derive(Debug, Parser)]
#[command(name = "membership_demo", about = "Merkle membership proof demo")]
struct Cli {
    /// Number of random leaves to commit to.
    #[arg(long, default_value_t = 16)]
    leaves: usize,

    /// Leaf to prove; random when omitted.
    #[arg(long)]
    index: Option<usize>,

    /// Seed for leaf generation; fresh entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Built-in profile name.
    #[arg(long, default_value = "bn254-sha256")]
    profile: String,

    /// JSON parameter file; takes precedence over `--profile`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also verify the proof against a perturbed root and expect rejection.
    #[arg(long)]
    tamper: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    params_hash: String,
    field_modulus: String,
    hash_family: String,
    leaf_count: usize,
    height: usize,
    index: usize,
    root: FieldElement,
    opening_verdict: Verdict,
    proof_verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    tampered_root_verdict: Option<Verdict>,
    private_values: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let report = run(&cli)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn load_params(cli: &Cli) -> Result<MembershipParams> {
    if let Some(path) = &cli.config {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        return MembershipParams::from_json(&json)
            .with_context(|| format!("loading params from {}", path.display()));
    }
    let Some(profile) = BuiltinProfile::from_name(&cli.profile) else {
        let known: Vec<&str> = BuiltinProfile::ALL.iter().map(|p| p.name()).collect();
        bail!("unknown profile {:?} (known: {})", cli.profile, known.join(", "));
    };
    Ok(MembershipParamsBuilder::from_profile(profile).build()?)
}

fn run(cli: &Cli) -> Result<Report> {
    if cli.leaves == 0 {
        bail!("--leaves must be at least 1");
    }
    let params = load_params(cli)?;
    let _parallelism = set_parallelism(params.parallel());
    let hasher = params.hasher()?;

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let leaves: Vec<u128> = (0..cli.leaves).map(|_| rng.gen()).collect();
    let index = match cli.index {
        Some(index) if index >= cli.leaves => {
            bail!("--index {index} out of range for {} leaves", cli.leaves)
        }
        Some(index) => index,
        None => rng.gen_range(0..cli.leaves),
    };

    let tree = MerkleTree::build(leaves, &hasher)?;
    let root = tree.root().clone();
    let leaf = tree.leaves()[index].clone();
    info!(leaves = cli.leaves, index, height = tree.height(), "tree committed");

    let opening = tree.opening(index)?;
    let opening_verdict = verify_opening(&hasher, &leaf, &opening, &root)?;
    if !opening_verdict.is_accepted() {
        bail!("off-domain self-check rejected opening {index}");
    }

    let proof = prove_membership(&hasher, &leaf, &opening, &root)?;
    let proof_verdict = verify_membership(&hasher, &root, &proof)?;
    info!(%proof_verdict, "membership proof verified");

    let tampered_root_verdict = if cli.tamper {
        let domain = hasher.domain();
        let wrong_root = domain.add(&root, &domain.reduce(1u8));
        let verdict = verify_membership(&hasher, &wrong_root, &proof)?;
        info!(%verdict, "tampered root checked");
        Some(verdict)
    } else {
        None
    };

    Ok(Report {
        params_hash: hex(&params_hash(&params)),
        field_modulus: hasher.domain().modulus().to_string(),
        hash_family: hasher.family().to_string(),
        leaf_count: tree.leaf_count(),
        height: tree.height(),
        index,
        root,
        opening_verdict,
        proof_verdict,
        tampered_root_verdict,
        private_values: proof.proof.private_values.len(),
    })
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}
