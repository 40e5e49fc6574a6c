// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use hhat_ast::{GrammarError, Node};
use hhat_core::execution::SimpleEvaluator;
use hhat_core::lowlevel::{LoweringSession, OpenQasm3};
use hhat_core::{
    find_definitions, locate, project_root_from_env, DataStack, HhatError, IndexManager, IrBlock,
    WorkingData,
};
use hhat_source_file::{HeatherParser, SourceTrait};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "resolve")]
#[command(about = "Demo of the H-hat core: resolve modules, find definitions, lower to OpenQASM 3.")]
#[command(long_about = "
Demo of the H-hat core.

Commands are `locate`, `defs`, `parse` and `lower`.
`locate` prints the source file of a function. `defs` prints every definition of it.
`parse` prints the syntax tree of a file. `lower` lowers the `main` block of a file
to OpenQASM 3. The project root defaults to $HHAT_PROJECT_ROOT, then to the current
directory. Set RUST_LOG=debug to follow each step.
")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the source file of a function
    Locate {
        /// dotted module path, e.g. `maths.linalg` or `main`
        module_path: String,
        function_name: String,
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// Print all definitions of a function
    Defs {
        module_path: String,
        function_name: String,
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// Parse a file and print its syntax tree
    Parse {
        #[arg(value_name = "FILENAME")]
        file_name: PathBuf,
    },

    /// Lower the `main` block of a file to OpenQASM 3
    Lower {
        #[arg(value_name = "FILENAME")]
        file_name: PathBuf,
        /// quantum data the program is generated for
        #[arg(long, default_value = "@q")]
        data: String,
        /// indices bound to each quantum data named in `main`
        #[arg(long, default_value_t = 1)]
        indices: usize,
        /// size of the index pool
        #[arg(long, default_value_t = 32)]
        max_num_index: usize,
    },
}

fn project_root(root: &Option<PathBuf>) -> PathBuf {
    root.clone()
        .or_else(project_root_from_env)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Commands::Locate {
            module_path,
            function_name,
            root,
        }) => locate(module_path, function_name, project_root(root)).map(|found| {
            println!("{}", found.file_path().display());
        }),

        Some(Commands::Defs {
            module_path,
            function_name,
            root,
        }) => find_definitions(
            &HeatherParser::new(),
            module_path,
            function_name,
            project_root(root),
        )
        .map(|(found, defs)| {
            println!(
                "{} definition(s) of `{}` in {}",
                defs.len(),
                found.function_name(),
                found.file_path().display()
            );
            for def in defs {
                println!("{def:#?}");
            }
        }),

        Some(Commands::Parse { file_name }) => parse(file_name),

        Some(Commands::Lower {
            file_name,
            data,
            indices,
            max_num_index,
        }) => lower(file_name, data, *indices, *max_num_index),

        None => {
            println!("Commands are locate, defs, parse and lower");
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let HhatError::Grammar(GrammarError::Syntax { path, errors }) = &err {
                if let Err(io_err) = hhat_source_file::print_compiler_errors(errors, path) {
                    eprintln!("{io_err}");
                }
            }
            eprintln!("error[{:?}]: {err}", err.kind());
            ExitCode::FAILURE
        }
    }
}

fn parse(file_name: &Path) -> hhat_core::Result<()> {
    let source_file = hhat_source_file::parse_source_file(file_name)?;
    println!("{:?}", source_file.parse().tree());
    if source_file.any_parse_errors() {
        println!("Found {} parse errors", source_file.parse().errors().len());
        if let Err(err) = source_file.print_syntax_errors() {
            eprintln!("{err}");
        }
    }
    Ok(())
}

fn lower(file_name: &Path, data: &str, indices: usize, max_num_index: usize) -> hhat_core::Result<()> {
    use hhat_ast::GrammarParser;

    let program = match HeatherParser::new().parse_file(file_name)? {
        Node::Program(program) => program,
        other => {
            return Err(HhatError::NotAProgram {
                path: file_name.to_path_buf(),
                found: other.kind_name(),
            })
        }
    };
    let code = match program.main() {
        Some(main) => IrBlock::from_body(main.body())?,
        None => IrBlock::default(),
    };

    let manager = IndexManager::new(max_num_index);
    let qdata = WorkingData::new(data);
    manager.request(&qdata, indices)?;
    for other in code.referenced_data() {
        if other != &qdata {
            manager.request(other, indices)?;
        }
    }

    let evaluator = SimpleEvaluator::new();
    let mut stack = DataStack::new();
    let mut session =
        LoweringSession::new(OpenQasm3, qdata, &code, &manager, &evaluator, &mut stack);
    print!("{}", session.call()?);
    Ok(())
}
