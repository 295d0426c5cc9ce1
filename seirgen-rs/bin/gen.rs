use std::io;

use seirgen::prelude::*;
use serde::Serialize;

/// Scalar views of one generated set, one CSV row per Monte Carlo draw.
#[derive(Serialize)]
struct SetRow {
    run: usize,
    #[serde(rename = "Tg")]
    tg: Real,
    #[serde(rename = "Ts")]
    ts: Real,
    #[serde(rename = "D")]
    d: Real,
    #[serde(rename = "Te")]
    te: Real,
    #[serde(rename = "Ti")]
    ti: Real,
    #[serde(rename = "R0")]
    r0: Real,
    #[serde(rename = "SIGMA")]
    sigma: Real,
    #[serde(rename = "GAMMA")]
    gamma: Real,
    #[serde(rename = "BETA")]
    beta: Real,
    #[serde(rename = "SYM_FRAC")]
    sym_frac: Real,
    #[serde(rename = "THETA")]
    theta: Real,
    #[serde(rename = "GAMMA_H")]
    gamma_h: Real,
}

pub fn main() {
    use simple_logger::SimpleLogger;
    SimpleLogger::new().init().unwrap();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("usage: gen <par_file> [n_sets] [var] [seed]");
        std::process::exit(2);
    }
    let n: usize = args
        .get(2)
        .map(|s| s.parse().expect("n_sets must be an integer"))
        .unwrap_or(100);
    let var: Real = args
        .get(3)
        .map(|s| s.parse().expect("var must be a number"))
        .unwrap_or(DEFAULT_VAR);
    let seed: u64 = args
        .get(4)
        .map(|s| s.parse().expect("seed must be an integer"))
        .unwrap_or_else(rand::random);

    let gen = match SeirParams::load(&args[1]) {
        Ok(gen) => gen,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    let sets = gen.generate_ensemble(n, Some(var), seed);

    let mut wtr = csv::Writer::from_writer(io::stdout());
    for (run, set) in sets.iter().enumerate() {
        wtr.serialize(SetRow {
            run,
            tg: set.scalar("Tg"),
            ts: set.scalar("Ts"),
            d: set.scalar("D"),
            te: set.te_scalar(),
            ti: set.ti_scalar(),
            r0: set.r0_scalar(),
            sigma: set.sigma_scalar(),
            gamma: set.gamma_scalar(),
            beta: set.beta_scalar(),
            sym_frac: set.sym_frac_scalar(),
            theta: set.theta_scalar(),
            gamma_h: set.gamma_h_scalar(),
        })
        .unwrap();
    }
    wtr.flush().unwrap();
}
