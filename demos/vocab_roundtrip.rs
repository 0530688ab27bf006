use tiny_mlp::Vocab;

fn main() -> tiny_mlp::Result<()> {
    let vocab = Vocab::new("abcdefghijklmnopqrstuvwxyz .,!£".chars())?;

    let text = "hello, world! £5";
    match vocab.encode(text) {
        Ok(ids) => println!("{text:?} -> {ids:?}"),
        Err(e) => println!("{text:?} -> {e}"),
    }

    let ids = vocab.encode("hello, world!")?;
    println!("{ids:?} -> {:?}", vocab.decode(&ids)?);
    println!("vocab size {}", vocab.len());
    Ok(())
}
