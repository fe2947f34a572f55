// demos/stream_framing.rs
//! Demonstrates length-prefixed frame extraction from chunked input.
//!
//! A producer delivers a byte stream in arbitrary network-sized chunks; the
//! consumer reassembles complete frames (u16 length prefix + payload) as
//! soon as enough bytes are staged. This is the workload the shift buffer's
//! lazy head compaction is built for: frames leave the head while chunks
//! keep arriving at the tail.

use shiftbuf::prelude::*;

/// Encodes `payload` as a length-prefixed frame.
fn encode_frame(payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(2 + payload.len());
    frame.extend_from_slice(&(payload.len() as u16).to_be_bytes());
    frame.extend_from_slice(payload);
    frame
}

/// Extracts one complete frame from the buffer, if enough bytes arrived.
fn try_extract_frame(buf: &mut ShiftBuffer<u8>) -> Result<Option<Vec<u8>>> {
    if buf.len() < 2 {
        return Ok(None);
    }

    let mut header = [0u8; 2];
    buf.peek(&mut header)?;
    let frame_len = usize::from(u16::from_be_bytes(header));

    if buf.len() < 2 + frame_len {
        return Ok(None);
    }

    buf.skip(2)?;
    let mut payload = vec![0u8; frame_len];
    buf.read(&mut payload)?;
    Ok(Some(payload))
}

fn main() -> Result<()> {
    println!("=== Length-Prefixed Frame Extraction ===\n");

    // The wire stream: four frames back to back.
    let messages: [&[u8]; 4] = [
        b"first message",
        b"the second message is a little longer",
        b"third",
        b"and a final message to close the stream",
    ];
    let mut wire = Vec::new();
    for message in &messages {
        wire.extend_from_slice(&encode_frame(message));
    }
    println!("Wire stream: {} bytes in {} frames", wire.len(), messages.len());

    // Deliver the stream in 7-byte chunks, extracting frames as they
    // complete. Frame boundaries never line up with chunk boundaries.
    let mut buf = ShiftBuffer::with_capacity(32);
    let mut received = Vec::new();

    for (chunk_index, chunk) in wire.chunks(7).enumerate() {
        buf.write(chunk);
        println!(
            "chunk {:2}: +{} bytes (staged: {})",
            chunk_index,
            chunk.len(),
            buf.len()
        );

        while let Some(payload) = try_extract_frame(&mut buf)? {
            println!(
                "          frame complete: {:?}",
                String::from_utf8_lossy(&payload)
            );
            received.push(payload);
        }
    }

    assert_eq!(received.len(), messages.len());
    for (payload, message) in received.iter().zip(messages.iter()) {
        assert_eq!(payload.as_slice(), *message);
    }
    println!(
        "\nAll {} frames reassembled; buffer capacity settled at {}",
        received.len(),
        buf.capacity()
    );

    Ok(())
}
