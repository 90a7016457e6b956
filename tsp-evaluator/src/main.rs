use anyhow::{anyhow, Result};
use clap::{arg, ArgAction, Command};
use std::path::PathBuf;
use tsp_challenges::{
    find_conflict, validate_tour, verify_tour, AdjacencyList, Difficulty, DistanceMatrix,
    TestCases, Tour,
};
use tsp_evaluator::{load_and_evaluate, EvaluationSettings, FailurePolicy};
use tsp_utils::{load_json_arg, save_json_file};

fn cli() -> Command {
    Command::new("tsp-evaluator")
        .about("Evaluates TSP approximations and checks independent sets")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("evaluate")
                .about("Runs an approximation over every test case and reports the total cost")
                .arg(
                    arg!(--settings [SETTINGS] "Settings json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--cases [CASES] "Path to the test cases file (.json, .gz for gzip, .zlib for zlib)")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--algorithm [ALGORITHM] "Name of the approximation to evaluate")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--skip "Skip invalid cases instead of aborting the run")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the evaluation will be saved to this file path as json")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("validate_tour")
                .about("Prints the cost of a tour, or -1 if it uses a forbidden edge")
                .arg(
                    arg!(<MATRIX> "Distance matrix json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<TOUR> "Tour json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("verify_tour")
                .about("Checks a tour is a permutation of all cities and prints its cost")
                .arg(
                    arg!(<MATRIX> "Distance matrix json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<TOUR> "Tour json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("check_independent_set")
                .about("Checks that no two vertices in a subset are adjacent")
                .arg(
                    arg!(<ADJ_LIST> "Adjacency list as a json array of neighbour arrays, e.g. [[1],[0,2],[1]] (json string, path to json file, or '-' for stdin)")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<VERTICES> "Vertex subset json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("generate_cases")
                .about("Writes a test cases file with seeded generated instances")
                .arg(
                    arg!(<OUTPUT> "Output path (.json, .gz to gzip, .zlib for zlib)")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--seed [SEED] "Seed for instance generation")
                        .default_value("0")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--num [NUM] "Number of generated instances")
                        .default_value("10")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--size [SIZE] "Number of cities per generated instance")
                        .default_value("50")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--forbidden [PERCENT] "Percent of edges outside a hidden tour to forbid")
                        .default_value("0")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    arg!(--files [FILES] "Existing test cases file whose 'files' category is kept")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
}

fn main() {
    env_logger::init();
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("evaluate", sub_m)) => evaluate(
            sub_m.get_one::<String>("settings").cloned(),
            sub_m.get_one::<PathBuf>("cases").cloned(),
            sub_m.get_one::<String>("algorithm").cloned(),
            sub_m.get_flag("skip"),
            sub_m.get_one::<PathBuf>("output").cloned(),
        ),
        Some(("validate_tour", sub_m)) => validate(
            sub_m.get_one::<String>("MATRIX").unwrap(),
            sub_m.get_one::<String>("TOUR").unwrap(),
        ),
        Some(("verify_tour", sub_m)) => verify(
            sub_m.get_one::<String>("MATRIX").unwrap(),
            sub_m.get_one::<String>("TOUR").unwrap(),
        ),
        Some(("check_independent_set", sub_m)) => check_independent_set(
            sub_m.get_one::<String>("ADJ_LIST").unwrap(),
            sub_m.get_one::<String>("VERTICES").unwrap(),
        ),
        Some(("generate_cases", sub_m)) => generate_cases(
            sub_m.get_one::<PathBuf>("OUTPUT").unwrap().clone(),
            *sub_m.get_one::<u64>("seed").unwrap(),
            *sub_m.get_one::<usize>("num").unwrap(),
            *sub_m.get_one::<usize>("size").unwrap(),
            *sub_m.get_one::<u32>("forbidden").unwrap(),
            sub_m.get_one::<PathBuf>("files").cloned(),
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn evaluate(
    settings: Option<String>,
    cases_path: Option<PathBuf>,
    algorithm: Option<String>,
    skip_invalid: bool,
    output_path: Option<PathBuf>,
) -> Result<()> {
    let mut settings = match settings {
        Some(settings) => EvaluationSettings::load(&settings)?,
        None => EvaluationSettings::default(),
    };
    if let Some(cases_path) = cases_path {
        settings.cases_path = cases_path;
    }
    if let Some(algorithm) = algorithm {
        settings.algorithm = algorithm;
    }
    if skip_invalid {
        settings.policy = FailurePolicy::Skip;
    }
    log::debug!("evaluating with settings {:?}", settings);

    let approximation = settings.resolve_algorithm()?;
    let evaluation = load_and_evaluate(&settings, approximation, &mut std::io::stdout().lock())?;
    if let Some(path) = output_path {
        save_json_file(&evaluation, &path)?;
    }
    Ok(())
}

fn validate(matrix: &str, tour: &str) -> Result<()> {
    let matrix: DistanceMatrix = load_json_arg(matrix)?;
    let tour: Tour = load_json_arg(tour)?;
    println!("{}", validate_tour(&tour, &matrix));
    Ok(())
}

fn verify(matrix: &str, tour: &str) -> Result<()> {
    let matrix: DistanceMatrix = load_json_arg(matrix)?;
    let tour: Tour = load_json_arg(tour)?;
    let cost = verify_tour(&matrix, &tour).map_err(|e| anyhow!("Invalid tour: {}", e))?;
    println!("Tour is valid. Cost: {}", cost);
    Ok(())
}

fn check_independent_set(adj_list: &str, vertices: &str) -> Result<()> {
    let adj_list: AdjacencyList = load_json_arg(adj_list)?;
    let vertices: Vec<usize> = load_json_arg(vertices)?;
    match find_conflict(&adj_list, &vertices) {
        None => println!("true"),
        Some((u, v)) => {
            println!("false");
            eprintln!("Vertices {} and {} are adjacent", u, v);
        }
    }
    Ok(())
}

fn generate_cases(
    output_path: PathBuf,
    seed: u64,
    num_generated: usize,
    size: usize,
    forbidden_edges_percent: u32,
    files_path: Option<PathBuf>,
) -> Result<()> {
    let files = match files_path {
        Some(path) => TestCases::load(path)?.files,
        None => Vec::new(),
    };
    let mut seed_bytes = [0u8; 32];
    seed_bytes[..8].copy_from_slice(&seed.to_le_bytes());
    let difficulty = Difficulty {
        size,
        forbidden_edges_percent,
    };
    let cases = TestCases::generate(&seed_bytes, files, num_generated, &difficulty)?;
    cases.save(&output_path)?;
    println!(
        "Wrote {} file cases and {} generated cases to {}",
        cases.files.len(),
        cases.generated.len(),
        output_path.display()
    );
    Ok(())
}
