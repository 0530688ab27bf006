//! Hand-weighted 2 -> 4 -> 3 classifier.
//!
//! Run with `RUST_LOG=tiny_mlp=trace` to see each forward stage.

use tiny_mlp::{Activation, Block, LinearLayer, Mlp, cross_entropy, softmax_with_stats};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> tiny_mlp::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tiny_mlp=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Each hidden unit responds to one quadrant-ish direction.
    let hidden = LinearLayer::new(
        vec![
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![-1.0, 0.0],
            vec![0.0, -1.0],
        ],
        vec![0.0; 4],
    )?;
    let out = LinearLayer::new(
        vec![
            vec![2.0, 0.0, -1.0, 0.0],
            vec![0.0, 2.0, 0.0, -1.0],
            vec![-1.0, -1.0, 1.5, 1.5],
        ],
        vec![0.0, 0.0, 0.5],
    )?;
    let mlp = Mlp::new(Block::new(hidden, Activation::ReLU)?, out)?;

    let samples = [
        ([2.0, 0.1], 0),
        ([0.2, 1.8], 1),
        ([-1.5, -1.0], 2),
        ([40.0, -3.0], 0),
    ];

    for (x, class) in samples {
        let logits = mlp.forward(&x)?;
        let (p, stats) = softmax_with_stats(&logits)?;

        let mut target = vec![0.0; p.len()];
        target[class] = 1.0;
        let loss = cross_entropy(&target, &p)?;

        println!(
            "x={x:?} predicted={} expected={class} loss={loss:.6} max_prob={:.6} saturated={}",
            mlp.predict(&x)?,
            stats.max_prob,
            stats.saturated
        );
    }

    // A width mismatch is reported with the whole cause chain.
    let mut broken = mlp.clone();
    broken.out.in_dim = 5;
    if let Err(e) = broken.forward(&[1.0, 1.0]) {
        println!("broken network: {}", e.report());
    }

    Ok(())
}
