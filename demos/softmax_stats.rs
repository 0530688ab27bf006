use tiny_mlp::{SoftmaxStats, shift, softmax_with_stats};

fn print_row(label: &str, z: &[f64]) -> tiny_mlp::Result<()> {
    let (p, s): (Vec<f64>, SoftmaxStats) = softmax_with_stats(z)?;
    println!(
        "{label:>10} z={z:?}\n{:>10} p={p:.6?} sum={:.6e} sum_prob={:.15} min={:.3e} max={:.6} saturated={}",
        "", s.sum, s.sum_prob, s.min_prob, s.max_prob, s.saturated
    );
    Ok(())
}

fn main() -> tiny_mlp::Result<()> {
    let z = [1.0, 0.0, -2.0];
    print_row("base", &z)?;
    print_row("shifted", &shift(&z, 1000.0)?)?;
    print_row("tiny", &[-1000.0, -1000.0])?;
    print_row("peaked", &[30.0, 0.0, 0.0])?;

    if let Err(e) = softmax_with_stats(&[0.0, f64::NAN]) {
        println!("{:>10} {e}", "nan");
    }
    Ok(())
}
