use std::path::PathBuf;

use evil_cliques::io;
use evil_cliques::logging::init_logging;
use evil_cliques::prelude::*;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use tracing::info;

use clap::{CommandFactory, ErrorKind, Parser};

/// Builds a hard maximum clique benchmark from several input graphs.
///
/// Every input is embedded `K` times, all copies are connected with edge
/// probability `PP` percent and one maximum clique of every copy is joined
/// into a single clique whose size is reported.
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Args{
    /// edge probability between the copies, in percent
    #[clap(short, long, default_value_t = 98, value_parser = clap::value_parser!(u32).range(0..=100))]
    percent: u32,

    /// input graph in DIMACS format; give one -k for every -g
    #[clap(short = 'g', long = "graph", required = true)]
    graphs: Vec<PathBuf>,

    /// number of copies of the corresponding input graph
    #[clap(short = 'k', long = "multiplicity", required = true)]
    multiplicities: Vec<usize>,

    /// random seed; drawn from the OS when absent
    #[clap(short, long)]
    seed: Option<u64>,

    /// directory for the generated files
    #[clap(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// also write the adjacency matrix as a PBM bitmap
    #[clap(long)]
    pbm: bool,

    /// also write the graph before the random relabelling, with suffix -noperm
    #[clap(long)]
    noperm: bool,

    /// write the vertices of the planted clique (after relabelling) to a .sol file
    #[clap(long)]
    solution: bool,
}

/// every -g needs its own -k
fn check_pairs(args: &Args) -> Result<(), clap::Error> {
    if args.graphs.len() != args.multiplicities.len() {
        return Err(Args::command()
            .error(ErrorKind::WrongNumberOfValues, "for each input graph -g a multiplicity -k must be given"));
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    if let Err(e) = check_pairs(&args) {
        e.exit();
    }
    init_logging().map_err(|e| e.to_string())?;

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(seed, "random seed");
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);

    let mut comments = io::banner();
    let mut request = CompositionRequest::new(args.percent as f64 / 100.);
    let mut name_parts = vec![];
    for (path, &k) in args.graphs.iter().zip(&args.multiplicities) {
        let input = io::read_dimacs_file(path)?;
        info!(file = %path.display(), nnodes = input.graph.nnodes(), edges = input.graph.nedges(), "read input graph");
        comments.extend(input.comments);
        name_parts.push((path.to_string_lossy().into_owned(), input.graph.nnodes(), k));
        request = request.with(input.graph, k);
    }

    let composition = compose(&request, &mut rng)?;
    let nnodes = composition.graph.nnodes();
    let nedges = composition.graph.nedges();
    let density = composition.graph.density();
    let clique_size = composition.clique_size();

    println!();
    println!("The resulting graph has {nnodes} nodes, {nedges} edges.");
    println!("Its density is {density:.6}");
    println!();
    println!("The size of its maximum clique is {clique_size}");
    println!();

    comments.push("The evil graph:".into());
    comments.push(io::summary(nnodes, density, clique_size));
    comments.push("".into());

    let name = io::output_name(nnodes, args.percent, &name_parts);
    let out = |suffix: &str| args.output_dir.join(format!("{name}{suffix}"));

    let Composition { graph, clique, .. } = composition;
    if args.noperm {
        io::save_dimacs_file(out("-noperm.clq"), &graph, &comments)?;
        if args.pbm {
            io::save_pbm_file(out("-noperm.pbm"), &graph, &comments)?;
        }
    }

    let permutation = Permutation::random(nnodes, &mut rng);
    let graph = permutation.apply(graph);
    io::save_dimacs_file(out(".clq"), &graph, &comments)?;
    if args.pbm {
        io::save_pbm_file(out(".pbm"), &graph, &comments)?;
    }
    if args.solution {
        io::save_solution_file(out(".sol"), &clique, &permutation)?;
    }

    println!("The name of the resulting graph is {name}.clq");
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn percent_must_not_exceed_100() {
        let args = Args::try_parse_from(["evil", "-p", "100", "-g", "a.clq", "-k", "2"]).unwrap();
        assert_eq!(args.percent, 100);
        assert!(check_pairs(&args).is_ok());
        let default = Args::try_parse_from(["evil", "-g", "a.clq", "-k", "2"]).unwrap();
        assert_eq!(default.percent, 98);

        let err = Args::try_parse_from(["evil", "-p", "101", "-g", "a.clq", "-k", "2"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn graphs_and_multiplicities_pair_up() {
        let args = Args::try_parse_from(["evil", "-g", "a.clq", "-k", "2", "-g", "b.clq"]).unwrap();
        let err = check_pairs(&args).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WrongNumberOfValues);

        let args = Args::try_parse_from(["evil", "-g", "a.clq", "-k", "2", "-g", "b.clq", "-k", "1"]).unwrap();
        assert_eq!(args.multiplicities, vec![2, 1]);
        assert!(check_pairs(&args).is_ok());
    }
}
