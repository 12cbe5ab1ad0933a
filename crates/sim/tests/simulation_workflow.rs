//! End-to-end tests: FASTA text in, JSON documents out.

use std::io::Write;
use std::sync::Arc;
use strand_sim::errors::{SimulationError, ValidationErrorKind};
use strand_sim::graph::PathwayGraph;
use strand_sim::simulation::{
    Configuration, GraphConfig, RunnerConfig, SimulationBuilder, SimulationRequest,
    SimulationRunner, VirusLibrary,
};
use strand_sim::trace::{
    OutputShape, RenderOptions, emit, final_state_json, parse_final_state, parse_tick_log,
    tick_log_json,
};
use strand_sim::validation::validate;
use tokio::runtime::Runtime;

const HOST: &str = ">host energetic\nGGGATGGATACCTAA\nATGCCGCCGTGA\n";
const VIRUSES: &str = ">Virus_Addition tick=2\nATGCCGTAA\n>Virus_Late tick=4\nATGACCTAG\n";

#[test]
fn test_validation_examples() {
    assert!(validate(">seq1\nACGT\nACGT\n").is_ok());

    let errors = validate("ACGT\n>seq1\n").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.0[0].kind, ValidationErrorKind::MissingHeader);

    let errors = validate(">seq1\nACGX\n").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.0[0].line, 1);
    assert!(matches!(
        errors.0[0].kind,
        ValidationErrorKind::InvalidSymbol { symbol: 'X', .. }
    ));

    let errors = validate(">seq1\nACNT\nACGT\nUUU\n").unwrap_err();
    let lines: Vec<_> = errors.iter().map(|e| e.line).collect();
    assert_eq!(lines, vec![1, 3]);
}

#[test]
fn test_full_run_with_viruses() {
    let library = Arc::new(VirusLibrary::from_fasta_str(VIRUSES).unwrap());
    let trace = SimulationBuilder::new()
        .fasta(HOST)
        .viruses(library)
        .build()
        .unwrap()
        .run()
        .unwrap();

    let last = trace.final_state().unwrap();
    assert_eq!(last.viruses, vec!["Virus_Addition", "Virus_Late"]);
    // Host segment 1 runs first, then the first virus hijacks tick 2.
    assert_eq!(&last.proteins[..3], &["Transport", "Protein_X", "Synthesis"]);
    assert!(last.has_protein("Protein_X"));

    let ticks: Vec<_> = trace.iter().map(|e| e.tick).collect();
    assert!(ticks.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(ticks[0], 0);
}

#[test]
fn test_serialized_traces_are_byte_identical() {
    let run = || {
        let trace = SimulationBuilder::new()
            .fasta(HOST)
            .mutation_rate(0.25)
            .seed(2024)
            .build()
            .unwrap()
            .run()
            .unwrap();
        tick_log_json(&trace, true).unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_documents_parse_back() {
    let trace = SimulationBuilder::new().fasta(HOST).build().unwrap().run().unwrap();

    let state = parse_final_state(&final_state_json(&trace, false).unwrap()).unwrap();
    assert_eq!(&state, trace.final_state().unwrap());

    let log = parse_tick_log(&tick_log_json(&trace, false).unwrap()).unwrap();
    assert_eq!(log, trace);
}

#[test]
fn test_emit_graph_document() {
    let library = Arc::new(VirusLibrary::from_fasta_str(VIRUSES).unwrap());
    let trace = SimulationBuilder::new()
        .fasta(HOST)
        .viruses(library)
        .build()
        .unwrap()
        .run()
        .unwrap();

    let options = RenderOptions::new(OutputShape::Graph).graph(GraphConfig {
        root_node_index: 1,
        connect_root: true,
    });
    let mut out = Vec::new();
    emit(&trace, &options, &mut out).unwrap();

    let graph: PathwayGraph = serde_json::from_slice(&out).unwrap();
    assert!(graph.node("Env_TEMP").is_some());
    assert!(graph.node("Virus_1").is_some());
    assert_eq!(graph.edges_into("Protein_1").count(), 2 + 2 + 1);
}

#[test]
fn test_configuration_file_drives_run() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        "[simulation]\nmax_ticks = 2\n\n[simulation.initial_environment]\npH = 7\n"
    )
    .unwrap();

    let config = Configuration::load(file.path()).unwrap();
    assert_eq!(config.simulation.max_ticks, 2);

    let err = SimulationBuilder::new()
        .fasta(HOST)
        .config(config.simulation)
        .build()
        .unwrap()
        .run()
        .unwrap_err();
    assert!(matches!(err, SimulationError::SimulationDiverged { ticks: 2, .. }));
}

#[test]
fn test_runner_batch() {
    let rt = Runtime::new().unwrap();
    let runner = SimulationRunner::new(&RunnerConfig {
        max_concurrent: 2,
        timeout_ms: 10_000,
    })
    .unwrap();

    let requests = (0..6)
        .map(|i| {
            let fasta = format!(">r{i}\n{}\n", "ATGACCTAA".repeat(i + 1));
            SimulationRequest::new(format!("r{i}"), SimulationBuilder::new().fasta(fasta))
        })
        .collect();

    let results = rt.block_on(runner.run_all(requests));
    for (i, result) in results.iter().enumerate() {
        let trace = result.as_ref().unwrap();
        assert_eq!(trace.final_state().unwrap().proteins.len(), i + 1);
    }
}
