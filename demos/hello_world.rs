use huffhex::compress;

fn main() -> huffhex::Result<()> {
    let input = "Hello World!";
    let (hex, decoded) = compress(input)?;

    println!("Original: {}", input);
    println!("Length original: {}", input.chars().count());
    println!("Hex compressed: {}", hex);
    println!("Length hex compressed: {}", hex.len());
    println!("Decompressed: {}", decoded);
    println!("Length decompressed: {}", decoded.chars().count());

    Ok(())
}
