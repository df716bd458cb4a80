#![no_main]

use arbitrary::Arbitrary;
use fpst::params::Params;
use fpst::text::Text;
use fpst::tree::SuffixTree;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    block_len: u8,
    body: Vec<u8>,
}

fuzz_target!(|input: Input| {
    // 0xff is reserved for the sentinel
    let body: Vec<u8> = input.body.into_iter().filter(|&b| b != 0xff).take(512).collect();
    let Ok(text) = Text::with_sentinel(body, 0xff) else {
        return;
    };
    let block_len = usize::from(input.block_len.max(1));
    let params = Params::from_u64(2_305_843_009_213_693_951, 1_234_567, block_len).unwrap();

    let tree = SuffixTree::build(&text, &params);
    assert_eq!(tree.leaf_count(), text.len());
    tree.verify().unwrap();
});
