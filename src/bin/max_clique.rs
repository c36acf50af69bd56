use evil_cliques::io;
use evil_cliques::logging::init_logging;
use evil_cliques::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging().map_err(|e| e.to_string())?;
    if let [_, infile] = &std::env::args().collect::<Vec<_>>()[..] {
        let g = io::read_dimacs_file(infile)?.graph;
        g.validate()?;

        let c = maximum_clique(&g);
        println!("{}", c.len());
        println!("{}", c.iter().map(|v| (v + 1).to_string()).collect::<Vec<_>>().join(" "));
    } else {
        eprintln!("Usage: max_clique FILE.clq");
        std::process::exit(1);
    }
    Ok(())
}
