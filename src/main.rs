/*!
## gSpan

A command-line utility for mining frequent subgraphs in labelled graphs.

Implements the gSpan algorithm by Xifeng Yan and Jiawei Han, published as
"gSpan: Graph-Based Substructure Pattern Mining" at ICDM 2002.

### License

MIT
*/
use gspan::{
    mine_many, mine_single, read_egf, read_tgf, Collection, Graph, Pattern, PatternEmbeddings,
    PatternWriter,
};

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;

use eyre::Result;

fn main() -> Result<()> {
    env_logger::init();

    let args = cli::main()?;

    let start = Instant::now();

    println!("------");
    let collection = measure("Load graphs", || -> Result<Collection> {
        let file = File::open(&args.input)?;
        let collection = if args.legacy {
            read_tgf(file)?
        } else {
            read_egf(file)?
        };
        Ok(collection)
    })?;
    println!("Input meta information:\n{}", collection);
    println!("------");

    let min_support = args.min_support(collection.graphs.len());
    println!("Minimum support count: {}", min_support);
    println!("------");

    let out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = PatternWriter::new(out, args.embeddings);
    let mut write_error = None;

    measure("Mine", || {
        let report = |pattern: &Pattern<usize, usize>,
                      embeddings: &PatternEmbeddings,
                      support: usize| {
            if let Err(error) = writer.write(pattern, embeddings, support, &collection) {
                write_error.get_or_insert(error);
            }
        };
        let vertex_label = |graph: &Graph, vertex: usize| graph.vertex_label(vertex);
        let edge_label = |graph: &Graph, edge: usize| graph.edge_label(edge);

        if collection.graphs.len() == 1 {
            mine_single(
                &collection.graphs[0],
                min_support,
                report,
                vertex_label,
                edge_label,
            );
        } else {
            mine_many(
                &collection.graphs,
                min_support,
                report,
                vertex_label,
                edge_label,
            );
        }
    });
    if let Some(error) = write_error {
        return Err(error.into());
    }

    println!("Patterns found: {}", writer.written());
    println!("------");
    println!("Total runtime = {:?}", start.elapsed());

    Ok(())
}

fn measure<R>(desc: &str, func: impl FnOnce() -> R) -> R {
    println!("Start :: {}", desc);
    let start = Instant::now();
    let result = func();
    println!("Finish :: {} took {:?}", desc, start.elapsed());
    result
}

mod cli {
    use gspan::EmbeddingMode;
    use pico_args::Arguments;
    use std::{ffi::OsStr, path::PathBuf, str::FromStr};

    use crate::Result;

    const HELP: &str = "\
gspan - frequent subgraph mining

USAGE:
  gspan -i FILE [-o FILE] [-c NUM | -s NUM] [-l] [-e MODE]

OPTIONS:
  -i, --input FILE       input graph collection
  -o, --output FILE      output file (default: standard output)
  -c, --min-count NUM    minimum support count (default: 1)
  -s, --min-support NUM  minimum support ratio in [0, 1]; the count is
                         ceil(NUM * number of graphs)
  -l, --legacy           read the legacy TGF format instead of EGF
  -e, --embeddings MODE  embedding output: none, autgrp or all
                         (default: none)
  -h, --help             print this help
";

    #[derive(Debug)]
    pub(crate) struct AppArgs {
        pub(crate) input: PathBuf,
        pub(crate) output: Option<PathBuf>,
        pub(crate) min_count: Option<usize>,
        pub(crate) min_ratio: Option<f64>,
        pub(crate) legacy: bool,
        pub(crate) embeddings: EmbeddingMode,
    }

    impl AppArgs {
        pub(crate) fn min_support(&self, graphs: usize) -> usize {
            match (self.min_count, self.min_ratio) {
                (Some(count), _) => count,
                (None, Some(ratio)) => (ratio * graphs as f64).ceil() as usize,
                (None, None) => 1,
            }
        }
    }

    pub(crate) fn main() -> Result<AppArgs> {
        let mut pargs = Arguments::from_env();

        if pargs.contains(["-h", "--help"]) {
            print!("{}", HELP);
            std::process::exit(0);
        }

        fn as_path_buf(arg: &OsStr) -> Result<PathBuf> {
            Ok(arg.into())
        }

        let args = AppArgs {
            input: pargs.value_from_os_str(["-i", "--input"], as_path_buf)?,
            output: pargs.opt_value_from_os_str(["-o", "--output"], as_path_buf)?,
            min_count: pargs.opt_value_from_str(["-c", "--min-count"])?,
            min_ratio: pargs.opt_value_from_str(["-s", "--min-support"])?,
            legacy: pargs.contains(["-l", "--legacy"]),
            embeddings: pargs
                .opt_value_from_fn(["-e", "--embeddings"], ModeWrapper::from_str)?
                .unwrap_or(ModeWrapper(EmbeddingMode::None))
                .into(),
        };

        if let Some(ratio) = args.min_ratio {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(eyre::eyre!("support ratio {} is not within [0, 1]", ratio));
            }
        }

        let rest = pargs.finish();
        if !rest.is_empty() {
            return Err(eyre::eyre!("unexpected arguments: {:?}", rest));
        }

        Ok(args)
    }

    struct ModeWrapper(EmbeddingMode);

    impl From<ModeWrapper> for EmbeddingMode {
        fn from(mode: ModeWrapper) -> Self {
            mode.0
        }
    }

    impl FromStr for ModeWrapper {
        type Err = eyre::Report;

        fn from_str(s: &str) -> Result<ModeWrapper> {
            match s {
                "none" => Ok(ModeWrapper(EmbeddingMode::None)),
                "autgrp" => Ok(ModeWrapper(EmbeddingMode::Groups)),
                "all" => Ok(ModeWrapper(EmbeddingMode::All)),
                _ => Err(eyre::eyre!("Unsupported embedding mode {}", s)),
            }
        }
    }
}
