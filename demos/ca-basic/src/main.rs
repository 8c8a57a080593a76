use circarray::{CircularBuffer, ResizePolicy};
use rand::Rng;

fn seed_buffer() -> CircularBuffer<u32> {
    let mut rng = rand::thread_rng();
    let values: Vec<u32> = (0..100).map(|_| rng.gen_range(0..1000)).collect();
    CircularBuffer::from(values)
}

fn main() {
    let mut buffer = seed_buffer();
    let mut rng = rand::thread_rng();

    println!(
        "seeded : {} elements, capacity {}",
        buffer.len(),
        buffer.capacity()
    );

    for step in 0..1000u32 {
        match rng.gen_range(0..6) {
            0 => buffer.push_front(step),
            1 => buffer.push_rear(step),
            2 => {
                let _ = buffer.pop_front();
            }
            3 => {
                let _ = buffer.pop_rear();
            }
            4 => {
                let count = rng.gen_range(-1..8);
                buffer.pop_rear_n(count);
            }
            _ => {
                let count = rng.gen_range(0..4);
                let popped = buffer.pop_front_n_or(count, u32::MAX);
                let misses = popped.iter().filter(|&&v| v == u32::MAX).count();
                if misses > 0 {
                    println!("step {} : buffer ran dry, {} defaults", step, misses);
                }
            }
        }
        if step % 100 == 0 {
            println!(
                "step {} : len {} - capacity {} - filled {:.2} - front {:?} - rear {:?}",
                step,
                buffer.len(),
                buffer.capacity(),
                buffer.fraction_filled(),
                buffer.front(),
                buffer.rear()
            );
        }
    }

    let snapshot = buffer.snapshot();
    let mut drained = 0;
    for value in snapshot {
        buffer.push_rear(value);
        drained += 1;
    }
    println!("doubled from a snapshot of {} : len {}", drained, buffer.len());

    let policy = match ResizePolicy::new(64, 8) {
        Ok(policy) => policy,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };
    let mut roomy = CircularBuffer::with_policy(policy);
    roomy.extend(buffer.pop_front_n(buffer.len() as isize));
    let head = roomy
        .slice(None, Some(8), 1)
        .map(|s| s.to_string())
        .unwrap_or_default();
    println!("moved into a roomy buffer : {}", head);
    println!("final : len {} - capacity {}", roomy.len(), roomy.capacity());
}
