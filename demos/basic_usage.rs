// demos/basic_usage.rs
//! Basic usage example of the shift buffer

use shiftbuf::prelude::*;

fn main() -> Result<()> {
    println!("=== Basic Byte Staging ===\n");

    // 1. Stage bytes at the tail, extract them from the head
    let mut buf = ShiftBuffer::new();

    buf.write(b"Hello, ");
    buf.write(b"World!");
    println!("Buffered: {} bytes (capacity {})", buf.len(), buf.capacity());

    let mut out = [0u8; 13];
    buf.read(&mut out)?;
    println!("Read back: {:?}", String::from_utf8_lossy(&out));
    println!("Remaining: {} bytes", buf.len());

    println!("\n=== Clone vs Move Appends ===\n");

    // 2. `write` clones from the caller's slice; the caller keeps the items
    let mut strings = ShiftBuffer::new();
    let originals = vec![String::from("alpha"), String::from("beta")];
    strings.write(&originals);
    println!(
        "After write: buffered {}, caller still owns {}",
        strings.len(),
        originals.len()
    );

    // 3. `shove` moves ownership in; the source vector is drained
    let mut batch = vec![String::from("gamma"), String::from("delta")];
    strings.shove(&mut batch);
    println!(
        "After shove: buffered {}, source vector holds {}",
        strings.len(),
        batch.len()
    );

    // Extraction overwrites caller-provided slots, oldest first
    let mut received = vec![String::new(), String::new(), String::new(), String::new()];
    strings.read(&mut received)?;
    println!("FIFO order out: {:?}", received);

    println!("\n=== Peek and Skip ===\n");

    let mut stream = ShiftBuffer::new();
    stream.write(b"HDR:payload");

    let mut header = [0u8; 4];
    stream.peek(&mut header)?;
    println!(
        "Peeked {:?}, still buffered: {}",
        String::from_utf8_lossy(&header),
        stream.len()
    );

    stream.skip(4)?;
    let mut payload = vec![0u8; stream.len()];
    stream.read(&mut payload)?;
    println!("Payload: {:?}", String::from_utf8_lossy(&payload));

    println!("\n=== Secure Erasure ===\n");

    let mut secrets = ShiftBuffer::new();
    secrets.write(b"ephemeral session key");
    println!("Staged {} sensitive bytes", secrets.len());

    secrets.burn();
    println!("After burn: {} bytes, capacity kept ({})", secrets.len(), secrets.capacity());

    Ok(())
}
