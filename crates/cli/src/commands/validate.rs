use anyhow::Result;
use strand_sim::validation::{validate, validate_raw};

use crate::args::ValidateArgs;
use crate::printing::print_validation_errors;
use crate::utils::read_input;

pub fn validate_input(args: &ValidateArgs) -> Result<()> {
    let input = read_input(args.file.as_deref())?;
    log::info!("Validating {}", input.source);

    let result = if args.raw {
        validate_raw(&input.text)
    } else {
        validate(&input.text)
    };

    match result {
        Ok(sequence) => {
            println!("✅ FASTA file is valid!");
            for record in sequence.records() {
                println!("  • {}: {} nucleotide(s)", record.id, record.sequence.len());
            }
            Ok(())
        }
        Err(errors) => {
            print_validation_errors(&input.source, &errors);
            anyhow::bail!("{} is not valid", input.source)
        }
    }
}
