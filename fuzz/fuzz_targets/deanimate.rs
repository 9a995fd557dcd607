// cargo fuzz run deanimate corpus/deanimate -- -timeout=30

#![no_main]

use libfuzzer_sys::fuzz_target;

use stillgif::Deanimator;

fuzz_target!(|data: &[u8]| {
    // first byte picks the chunk size
    let Some((sz, data)) = data.split_first() else {
        return;
    };
    let sz = usize::from(*sz).max(1);
    let chunks = data.chunks(sz).map(Ok);
    let mut whole = vec![];
    for chunk in Deanimator::new(chunks).min_chunk_sz(64) {
        match chunk {
            Ok(c) => whole.extend(c),
            Err(_) => return,
        }
    }
    let once: Vec<u8> = Deanimator::new(std::iter::once(Ok(data)))
        .into_fragments()
        .flatten()
        .flatten()
        .collect();
    assert_eq!(whole, once);
});
