//! bytecpu CLI: load a program image, run it to termination, dump the final
//! state.
//!
//! The program's characters (print opcode) go to stdout; trace lines and the
//! final dump go to stderr, so the two streams can be separated or observed
//! interleaved. Exit codes: 0 clean halt, 1 runtime error, 2 load/usage
//! error.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use bytecpu::{Cpu, CpuError, Step, TraceMode, loader};

/// bytecpu: an 8-bit virtual CPU for 256-byte programs
#[derive(Parser)]
#[command(name = "bytecpu")]
#[command(version)]
#[command(about = "Run a 256-byte binary program on the bytecpu virtual CPU", long_about = None)]
struct Cli {
    /// Path to the program image (1-256 bytes); reads stdin when omitted
    #[arg(value_name = "PROGRAM")]
    program: Option<PathBuf>,

    /// Trace every executed instruction to stderr
    /// (also enabled by BYTECPU_TRACE=1)
    #[arg(long)]
    trace: bool,

    /// With --trace, keep NOP untraced so busy-wait loops do not flood the
    /// output (also enabled by BYTECPU_TRACE_SKIP_NOP=1)
    #[arg(long, requires = "trace")]
    trace_skip_nop: bool,

    /// Stop after this many instructions (a cap the CLI imposes; the core
    /// itself runs unbounded)
    #[arg(long, value_name = "N")]
    max_steps: Option<u64>,
}

fn env_flag(name: &str) -> bool {
    std::env::var_os(name).is_some_and(|v| !v.is_empty() && v != "0")
}

fn trace_mode(cli: &Cli) -> TraceMode {
    let trace = cli.trace || env_flag("BYTECPU_TRACE");
    let skip_nop = cli.trace_skip_nop || env_flag("BYTECPU_TRACE_SKIP_NOP");
    match (trace, skip_nop) {
        (false, _) => TraceMode::Off,
        (true, false) => TraceMode::All,
        (true, true) => TraceMode::SkipNop,
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let program = match &cli.program {
        Some(path) => loader::from_path(path),
        None => loader::from_reader(io::stdin().lock()),
    };
    let program = match program {
        Ok(p) => p,
        Err(e) => {
            error!("{e}");
            return ExitCode::from(2);
        }
    };

    let mut cpu = Cpu::new(program, trace_mode(&cli));
    let mut out = io::stdout().lock();
    let mut diag = io::stderr().lock();

    let outcome = run_capped(&mut cpu, cli.max_steps, &mut out, &mut diag);
    if outcome == Ok(Step::Continued) {
        // Only reachable with --max-steps set. Written straight to stderr so
        // the notice shows regardless of the log filter.
        let cap = cli.max_steps.unwrap_or_default();
        let _ = writeln!(diag, "step cap of {cap} reached; stopping");
    }

    // The dump is always produced, clean halt or not, before we report the
    // outcome through the exit code.
    let _ = out.flush();
    let _ = writeln!(diag, "{cpu}");

    match outcome {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::from(1)
        }
    }
}

/// Drive the CPU to termination, or stop after `cap` executed instructions
/// when a cap is given (the cap is this caller's policy; the core itself
/// runs unbounded).
///
/// `Ok(Step::Halted)` is a clean halt; `Ok(Step::Continued)` means the cap
/// was reached with the program still running.
fn run_capped(
    cpu: &mut Cpu,
    cap: Option<u64>,
    out: &mut dyn Write,
    diag: &mut dyn Write,
) -> Result<Step, CpuError> {
    let mut steps: u64 = 0;
    loop {
        match cpu.step(out, diag)? {
            Step::Halted => return Ok(Step::Halted),
            Step::Continued => {
                steps += 1;
                if cap.is_some_and(|cap| steps >= cap) {
                    return Ok(Step::Continued);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::sink;

    use bytecpu::ReadOnly;

    fn boot(image: &[u8]) -> Cpu {
        Cpu::new(ReadOnly::from_image(image), TraceMode::Off)
    }

    #[test]
    fn capped_loop_stops_after_exactly_n_steps() {
        // Three NOPs then HLT. A cap equal to the NOP count stops before the
        // halt is ever fetched; one more step reaches it.
        let image = [0x00, 0x00, 0x00, 0x0F];
        let mut cpu = boot(&image);
        assert_eq!(
            run_capped(&mut cpu, Some(3), &mut sink(), &mut sink()),
            Ok(Step::Continued)
        );
        assert_eq!(cpu.state().pc, 3);

        let mut cpu = boot(&image);
        assert_eq!(
            run_capped(&mut cpu, Some(4), &mut sink(), &mut sink()),
            Ok(Step::Halted)
        );
    }

    #[test]
    fn jump_only_program_stops_at_the_cap() {
        // JMP 0: loops forever without a cap.
        let mut cpu = boot(&[0x0B, 0x00]);
        assert_eq!(
            run_capped(&mut cpu, Some(10), &mut sink(), &mut sink()),
            Ok(Step::Continued)
        );
        assert_eq!(cpu.state().pc, 0);
    }

    #[test]
    fn uncapped_run_halts_cleanly() {
        let mut cpu = boot(&[0x0F]);
        assert_eq!(
            run_capped(&mut cpu, None, &mut sink(), &mut sink()),
            Ok(Step::Halted)
        );
    }

    #[test]
    fn capped_run_still_reports_fatal_errors() {
        // The first unknown opcode faults well before a generous cap.
        let mut cpu = boot(&[0x10]);
        assert_eq!(
            run_capped(&mut cpu, Some(100), &mut sink(), &mut sink()),
            Err(CpuError::UnknownOpcode { opcode: 0x10 })
        );
    }

    #[test]
    fn trace_mode_selection() {
        let base = Cli {
            program: None,
            trace: false,
            trace_skip_nop: false,
            max_steps: None,
        };
        assert_eq!(trace_mode(&base), TraceMode::Off);
        let traced = Cli { trace: true, ..base };
        assert_eq!(trace_mode(&traced), TraceMode::All);
        let quiet = Cli {
            trace: true,
            trace_skip_nop: true,
            ..traced
        };
        assert_eq!(trace_mode(&quiet), TraceMode::SkipNop);
    }
}
