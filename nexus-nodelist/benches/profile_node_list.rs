//! Cycle-accurate per-operation latency for NodeList using rdtscp.
//!
//! Run with:
//!   cargo build --release --bench profile_node_list
//!   taskset -c 0 ./target/release/deps/profile_node_list-*

use hdrhistogram::Histogram;
use nexus_nodelist::NodeList;
use std::hint::black_box;

const CHILDREN: usize = 64;
const SAMPLES: usize = 100_000;

#[inline(always)]
fn rdtscp() -> u64 {
    #[cfg(target_arch = "x86_64")]
    unsafe {
        let mut aux: u32 = 0;
        std::arch::x86_64::__rdtscp(&mut aux)
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
        panic!("rdtscp only supported on x86_64");
    }
}

fn print_stats(name: &str, hist: &Histogram<u64>) {
    println!("{}", name);
    println!("  min:  {:>6} cycles", hist.min());
    println!("  p50:  {:>6} cycles", hist.value_at_quantile(0.50));
    println!("  p99:  {:>6} cycles", hist.value_at_quantile(0.99));
    println!("  p999: {:>6} cycles", hist.value_at_quantile(0.999));
    println!("  max:  {:>6} cycles", hist.max());
    println!("  avg:  {:>6.0} cycles", hist.mean());
}

fn profile_get() -> Histogram<u64> {
    let list: NodeList<u32> = (0..CHILDREN as u32).collect();
    let mut hist = Histogram::<u64>::new(3).unwrap();

    for i in 0..SAMPLES {
        let index = i % CHILDREN;
        let start = rdtscp();
        black_box(list.get(black_box(index)));
        let end = rdtscp();
        let _ = hist.record(end.wrapping_sub(start));
    }

    hist
}

fn profile_insert_middle() -> Histogram<u64> {
    let mut list: NodeList<u32> = (0..CHILDREN as u32).collect();
    let mut hist = Histogram::<u64>::new(3).unwrap();

    for _ in 0..SAMPLES {
        let start = rdtscp();
        list.insert(black_box(CHILDREN / 2), u32::MAX);
        let end = rdtscp();
        let _ = hist.record(end.wrapping_sub(start));
        black_box(list.remove(CHILDREN / 2));
    }

    hist
}

fn profile_remove_node() -> Histogram<u64> {
    let mut list: NodeList<u32> = (0..CHILDREN as u32).collect();
    let mut hist = Histogram::<u64>::new(3).unwrap();

    for i in 0..SAMPLES {
        let node = (i % CHILDREN) as u32;
        let start = rdtscp();
        black_box(list.remove_node(black_box(node)));
        let end = rdtscp();
        let _ = hist.record(end.wrapping_sub(start));
        list.push(node);
    }

    hist
}

fn main() {
    println!("NodeList latency ({} children, {} samples)", CHILDREN, SAMPLES);
    println!("========================================");
    println!();

    print_stats("get:", &profile_get());
    println!();
    print_stats("insert (middle):", &profile_insert_middle());
    println!();
    print_stats("remove_node:", &profile_remove_node());
}
