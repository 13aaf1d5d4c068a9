use std::{
    env, fs,
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use ciruelas::{
    ast::printer::print_preorder, compiler::compiler::generate, display_error,
    errors::errors::Failure, lexer::lexer::tokenize, parser::parser::parse, report_diagnostics,
    type_checker::type_checker::analyze,
};
use clap::{CommandFactory, Parser};
use tracing::{debug, info};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

const LOG_FILTER: &str = "RUST_LOG";

/// Compilador de Ciruelas a Python.
#[derive(Parser, Debug)]
#[command(name = "ciruelas", version)]
struct Args {
    /// Solo explora el archivo y muestra los componentes léxicos
    #[arg(long, conflicts_with_all = ["solo_analizar", "solo_verificar", "generar_python"])]
    solo_explorar: bool,

    /// Explora y analiza el archivo, muestra el árbol en preorden
    #[arg(long, conflicts_with_all = ["solo_verificar", "generar_python"])]
    solo_analizar: bool,

    /// Verifica el archivo y muestra el árbol decorado
    #[arg(long, conflicts_with = "generar_python")]
    solo_verificar: bool,

    /// Genera el programa en Python
    #[arg(long)]
    generar_python: bool,

    /// Directorio donde se escribe el programa generado
    #[arg(long, default_value = "transpilados")]
    salida: PathBuf,

    /// Muestra más bitácora (-v para debug, -vv para trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Apaga la bitácora
    #[arg(long)]
    silent: bool,

    /// Archivo fuente en Ciruelas
    archivo: PathBuf,
}

impl Args {
    fn has_mode(&self) -> bool {
        self.solo_explorar || self.solo_analizar || self.solo_verificar || self.generar_python
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing_subscriber(args.verbose, args.silent);

    if !args.has_mode() {
        println!("{}", Args::command().render_help());
        return ExitCode::SUCCESS;
    }

    let source = match fs::read_to_string(&args.archivo) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("No se pudo leer '{}': {}", args.archivo.display(), error);
            return ExitCode::FAILURE;
        }
    };

    let program = match run(&args, &source) {
        Ok(Some(program)) => program,
        Ok(None) => return ExitCode::SUCCESS,
        Err(failure) => {
            report_failure(&failure, &source, &args.archivo);
            return ExitCode::FAILURE;
        }
    };

    match write_program(&args.salida, &args.archivo, &program) {
        Ok(output) => {
            println!("Programa generado en {}", output.display());
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!(
                "No se pudo escribir en '{}': {}",
                args.salida.display(),
                error
            );
            ExitCode::FAILURE
        }
    }
}

/// Runs the pipeline up to the stage the selected mode asks for.
///
/// Returns the generated program only in `--generar-python` mode.
fn run(args: &Args, source: &str) -> Result<Option<String>, Failure> {
    let start = Instant::now();
    let tokens = tokenize(source)?;

    println!("Tokenized in {:?}", start.elapsed());

    if args.solo_explorar {
        for token in &tokens {
            println!("{}", token);
        }
        return Ok(None);
    }

    let parse_start = Instant::now();
    let mut ast = parse(tokens)?;

    println!("Parsed in {:?}", parse_start.elapsed());

    if args.solo_analizar {
        print_preorder(&ast);
        return Ok(None);
    }

    let type_check_start = Instant::now();
    analyze(&mut ast)?;

    println!("Type checked in {:?}", type_check_start.elapsed());

    if args.solo_verificar {
        print_preorder(&ast);
        return Ok(None);
    }

    let compile_start = Instant::now();
    let program = generate(&ast)?;

    println!("Compiled in {:?}", compile_start.elapsed());
    println!("Total time: {:?}", start.elapsed());

    Ok(Some(program))
}

fn report_failure(failure: &Failure, source: &str, file: &Path) {
    debug!("{}", failure);

    if failure.is_fatal() {
        for error in &failure.errors {
            display_error(error, source, file);
        }
    }

    println!("{}", report_diagnostics(&failure.errors));
}

/// Writes `program` to `<salida>/<stem>_generado.py`, creating the directory.
fn write_program(salida: &Path, archivo: &Path, program: &str) -> std::io::Result<PathBuf> {
    fs::create_dir_all(salida)?;

    let stem = archivo
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("programa"));
    let output = salida.join(format!("{}_generado.py", stem));

    fs::write(&output, program)?;
    info!("wrote {} bytes to {}", program.len(), output.display());

    Ok(output)
}

/// Installs the global subscriber.
///
/// `-v`/`-vv` and `--silent` take precedence over `RUST_LOG`. Without either,
/// only errors are logged: recoverable diagnostics already reach the user
/// through the error report.
fn init_tracing_subscriber(verbosity: u8, silent: bool) {
    let level_filter = match (silent, verbosity) {
        (true, _) => Some(LevelFilter::OFF),
        (false, 0) => None,
        (false, 1) => Some(LevelFilter::DEBUG),
        (false, _) => Some(LevelFilter::TRACE),
    };

    let env_filter = match (level_filter, env::var_os(LOG_FILTER)) {
        (Some(level_filter), _) => EnvFilter::default().add_directive(level_filter.into()),
        (None, Some(_)) => {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
        }
        (None, None) => EnvFilter::new("error"),
    };

    tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_level(true)
        .with_file(false)
        .with_line_number(false)
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
