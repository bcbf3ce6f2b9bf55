use crate::model::Symbol;

/// Split `symbols` into ordered batches whose comma-joined form stays within
/// `max_length` characters, packing each batch as full as possible.
///
/// An empty input yields a single empty batch; callers must not turn it into
/// a request.
pub fn batch_symbols(symbols: &[Symbol], max_length: usize) -> Vec<Vec<Symbol>> {
    let mut batches = Vec::new();
    let mut current = Vec::new();
    // Length of the symbols in `current`, each counted with its trailing comma.
    let mut current_length = 0;

    for symbol in symbols {
        if current_length + symbol.len() > max_length && !current.is_empty() {
            batches.push(std::mem::take(&mut current));
            current_length = 0;
        }
        current.push(symbol.clone());
        current_length += symbol.len() + 1;
    }

    batches.push(current);
    batches
}

pub fn join_symbols(symbols: &[Symbol]) -> String {
    symbols
        .iter()
        .map(Symbol::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn symbols(raw: &[&str]) -> Vec<Symbol> {
        raw.iter().map(|s| Symbol::parse(s).unwrap()).collect()
    }

    #[test]
    fn short_list_fits_one_batch() {
        let input = symbols(&["BTC", "ETH", "LTC"]);
        let batches = batch_symbols(&input, 30);

        assert_eq!(batches, vec![input]);
        assert_eq!(join_symbols(&batches[0]), "BTC,ETH,LTC");
    }

    #[test]
    fn five_char_symbols_split_at_boundary() {
        let input = symbols(&[
            "AAAAA", "BBBBB", "CCCCC", "DDDDD", "EEEEE", "FFFFF", "GGGGG", "HHHHH", "IIIII",
            "JJJJJ",
        ]);
        let batches = batch_symbols(&input, 30);

        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].len(), 5);
        assert_eq!(batches[1].len(), 5);
        assert_eq!(batches[1][0].as_str(), "FFFFF");
    }

    #[test]
    fn empty_input_yields_single_empty_batch() {
        let batches = batch_symbols(&[], 30);
        assert_eq!(batches, vec![Vec::<Symbol>::new()]);
    }

    fn arb_symbols() -> impl Strategy<Value = Vec<Symbol>> {
        proptest::collection::vec("[A-Z0-9_]{3,5}", 0..40).prop_map(|raw| {
            raw.iter()
                .map(|token| Symbol::parse(token).unwrap())
                .collect()
        })
    }

    proptest! {
        #[test]
        fn batches_respect_limit_and_preserve_order(
            input in arb_symbols(),
            limit in 5usize..=64,
        ) {
            let batches = batch_symbols(&input, limit);

            if input.is_empty() {
                prop_assert_eq!(batches, vec![Vec::<Symbol>::new()]);
            } else {
                for batch in &batches {
                    prop_assert!(!batch.is_empty());
                    prop_assert!(join_symbols(batch).len() <= limit);
                }
                let flattened: Vec<Symbol> = batches.into_iter().flatten().collect();
                prop_assert_eq!(flattened, input);
            }
        }
    }
}
