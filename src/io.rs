//! Reading and writing graphs: DIMACS edge lists (`p edge N M` / `e a b`)
//! and plain PBM (`P1`) adjacency bitmaps.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::warn;

use crate::error::{Error, Result};
use crate::graph::*;
use crate::permutation::Permutation;

/// A graph read from a DIMACS file, with the text of its leading comment lines.
#[derive(Clone, Debug)]
pub struct DimacsGraph {
    pub graph: CompactMatrixGraph,
    pub comments: Vec<String>,
}

fn parse_error(line: usize, message: impl Into<String>) -> Error {
    Error::Parse { line, message: message.into() }
}

fn parse_number<T: std::str::FromStr>(token: Option<&str>, line: usize, what: &str) -> Result<T> {
    let token = token.ok_or_else(|| parse_error(line, format!("missing {what}")))?;
    token.parse().map_err(|_| parse_error(line, format!("invalid {what} `{token}`")))
}

/// ```
/// use evil_cliques::io::read_dimacs;
/// use evil_cliques::graph::*;
/// let text = "c a path\np edge 3 2\ne 1 2\ne 2 3\n";
/// let g = read_dimacs(text.as_bytes()).unwrap();
/// assert_eq!(g.comments, vec!["a path".to_string()]);
/// assert_eq!(g.graph.edges(), vec![[0, 1], [1, 2]]);
/// ```
pub fn read_dimacs<R: BufRead>(reader: R) -> Result<DimacsGraph> {
    let mut comments = vec![];
    let mut graph: Option<CompactMatrixGraph> = None;
    let mut announced_edges: usize = 0;
    let mut read_edges: usize = 0;
    let mut lineno = 0;
    for line in reader.lines() {
        let line = line?;
        lineno += 1;
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            None => continue,
            Some("p") => {
                if graph.is_some() {
                    return Err(parse_error(lineno, "duplicate problem line"));
                }
                match tokens.next() {
                    Some("edge") => {}
                    Some(format) => return Err(parse_error(lineno, format!("unsupported format `{format}`, expected `edge`"))),
                    None => return Err(parse_error(lineno, "missing format")),
                }
                let nnodes: usize = parse_number(tokens.next(), lineno, "vertex count")?;
                if Node::try_from(nnodes).is_err() {
                    return Err(Error::TooLarge(nnodes));
                }
                announced_edges = parse_number(tokens.next(), lineno, "edge count")?;
                graph = Some(CompactMatrixGraph::new_disconnected(nnodes));
            }
            Some("e") => {
                let g = graph.as_mut().ok_or_else(|| parse_error(lineno, "edge before problem line"))?;
                let a: Node = parse_number(tokens.next(), lineno, "vertex")?;
                let b: Node = parse_number(tokens.next(), lineno, "vertex")?;
                for v in [a, b] {
                    if v == 0 || v as usize > g.nnodes() {
                        return Err(parse_error(lineno, format!("vertex {v} not in 1..={}", g.nnodes())));
                    }
                }
                if a == b {
                    return Err(parse_error(lineno, format!("self-loop at vertex {a}")));
                }
                g.add_edge(a - 1, b - 1);
                read_edges += 1;
            }
            Some(_) => {
                if graph.is_none() {
                    if let Some(text) = line.strip_prefix('c') {
                        comments.push(text.trim().to_string());
                    }
                }
            }
        }
    }
    let graph = graph.ok_or_else(|| parse_error(lineno, "missing problem line `p edge N M`"))?;
    if read_edges != announced_edges {
        warn!(announced = announced_edges, read = read_edges, "edge count differs from problem line");
    }
    return Ok(DimacsGraph { graph, comments });
}

pub fn read_dimacs_file<P: AsRef<Path>>(path: P) -> Result<DimacsGraph> {
    let file = File::open(path)?;
    read_dimacs(BufReader::new(file))
}

fn write_comments<W: Write>(out: &mut W, marker: &str, comments: &[String]) -> std::io::Result<()> {
    for c in comments {
        if c.is_empty() {
            writeln!(out, "{marker}")?;
        } else {
            writeln!(out, "{marker} {c}")?;
        }
    }
    Ok(())
}

/// ```
/// use evil_cliques::io::write_dimacs;
/// use evil_cliques::graph::*;
/// let g = CompactMatrixGraph::complete(3);
/// let mut out = vec![];
/// write_dimacs(&mut out, &g, &["triangle".to_string()]).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "c triangle\np edge 3 3\ne 1 2\ne 1 3\ne 2 3\n");
/// ```
pub fn write_dimacs<W: Write, G: UndirectedGraph>(out: &mut W, graph: &G, comments: &[String]) -> std::io::Result<()> {
    let edges = graph.edges();
    write_comments(out, "c", comments)?;
    writeln!(out, "p edge {} {}", graph.nnodes(), edges.len())?;
    for [a, b] in edges {
        writeln!(out, "e {} {}", a + 1, b + 1)?;
    }
    Ok(())
}

pub fn write_pbm<W: Write, G: UndirectedGraph>(out: &mut W, graph: &G, comments: &[String]) -> std::io::Result<()> {
    writeln!(out, "P1")?;
    write_comments(out, "#", comments)?;
    writeln!(out, "{} {}", graph.nnodes(), graph.nnodes())?;
    for a in graph.iter_nodes() {
        let row: Vec<&str> = graph.iter_nodes().map(|b| if graph.has_edge(a, b) { "1" } else { "0" }).collect();
        writeln!(out, "{}", row.join(" "))?;
    }
    Ok(())
}

/// 1-based clique vertices, relabelled by `permutation`, sorted, one per line
pub fn write_solution<W: Write>(out: &mut W, clique: &[Node], permutation: &Permutation) -> std::io::Result<()> {
    let mut mapped: Vec<Node> = clique.iter().map(|&v| permutation.map(v)).collect();
    mapped.sort_unstable();
    for v in mapped {
        writeln!(out, "{}", v + 1)?;
    }
    Ok(())
}

pub fn save_dimacs_file<P: AsRef<Path>, G: UndirectedGraph>(path: P, graph: &G, comments: &[String]) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_dimacs(&mut out, graph, comments)?;
    out.flush()?;
    Ok(())
}

pub fn save_pbm_file<P: AsRef<Path>, G: UndirectedGraph>(path: P, graph: &G, comments: &[String]) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_pbm(&mut out, graph, comments)?;
    out.flush()?;
    Ok(())
}

pub fn save_solution_file<P: AsRef<Path>>(path: P, clique: &[Node], permutation: &Permutation) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_solution(&mut out, clique, permutation)?;
    out.flush()?;
    Ok(())
}

/// comment block identifying the generator
pub fn banner() -> Vec<String> {
    vec![
        "".into(),
        "(EVIL) Extremely-hard and Versatile Instance".into(),
        "Library for Clique Search Benchmarks".into(),
        "".into(),
        format!("version: {}", env!("CARGO_PKG_VERSION")),
        "".into(),
        "Academic Free License 3.0".into(),
        "".into(),
    ]
}

/// `|V|=.., density=.., omega(E)=..`
pub fn summary(nnodes: usize, density: f64, clique_size: usize) -> String {
    format!("|V|={nnodes}, density={density:.6}, omega(E)={clique_size}")
}

/// `evil-N{n}-p{percent}` followed by `-{stem}{n_i}x{k_i}` per input
/// ```
/// use evil_cliques::io::output_name;
/// assert_eq!(output_name(30, 98, &[("brock".to_string(), 10, 2), ("k4".to_string(), 5, 2)]), "evil-N30-p98-bro10x2-k45x2");
/// ```
pub fn output_name(nnodes: usize, percent: u32, inputs: &[(String, usize, usize)]) -> String {
    let mut name = format!("evil-N{nnodes}-p{percent}");
    for (stem, n, k) in inputs {
        name += &format!("-{}{n}x{k}", crate::short_stem(Path::new(stem), 3));
    }
    return name;
}
