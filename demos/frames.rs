use qho::{ params::Params, pipeline, potential::harmonic_level, solve::Method };

// compute the eigenstates of the default oscillator in the background, then
// step through the first few animation frames

const FRAMES: usize = 8;

fn main() -> anyhow::Result<()> {
    // optionally take parameters as a JSON document on the command line
    let params = match std::env::args().nth(1) {
        Some(json) => Params::from_json(&json)?,
        None => Params { k: 1e5, ..Params::default() },
    };

    let pending = pipeline::spawn(params, Method::default())?;
    let store = pending.wait()?;

    println!("n = {}, dx = {:.3e}", store.len(), store.get_dx());
    println!("{:>5} {:>14} {:>14}", "frame", "computed", "continuum");
    for frame_no in 0..FRAMES {
        let state = store.frame(frame_no);
        let nodes
            = state.wf.iter().zip(state.wf.iter().skip(1))
            .filter(|(a, b)| **a * **b < 0.0)
            .count();
        println!(
            "{:>5} {:>14.6e} {:>14.6e}  ({} nodes, peak |ψ| = {:.3})",
            frame_no,
            state.e,
            harmonic_level(frame_no, params.k, params.mass),
            nodes,
            state.magnitudes().fold(0.0_f64, |acc, m| acc.max(*m)),
        );
    }
    Ok(())
}
