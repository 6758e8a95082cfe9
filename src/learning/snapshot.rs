//! Text snapshot codec for the seven value/count tables
//!
//! A snapshot is seven blocks separated by one blank line, in the fixed
//! order: MC values, TD values, Q values, MC return sums, MC counts,
//! TD counts, Q counts. Each block holds one `key value` line per state in
//! canonical enumeration order, with the key rendered as `(i,j,k)` and the
//! value as a plain number or a `[a,b]` pair, neither with internal spaces.
//!
//! Decoding uses a restrictive grammar (integer, float, or two-element
//! numeric list) rather than any generic evaluation, and fails fast on the
//! first malformed block, key, or value token.

use std::{collections::HashMap, fmt::Write as _, fs, path::Path};

use crate::{
    blackjack::State,
    error::{Error, Result},
};

use super::tables::ValueTables;

/// Number of table blocks in a snapshot
pub const BLOCK_COUNT: usize = 7;

/// Write `tables` to `path` in snapshot format
pub fn save<P: AsRef<Path>>(tables: &ValueTables, path: P) -> Result<()> {
    fs::write(path.as_ref(), encode(tables)?).map_err(|source| Error::Io {
        operation: format!("write snapshot '{}'", path.as_ref().display()),
        source,
    })
}

/// Read a snapshot from `path` into a fresh set of tables
pub fn load<P: AsRef<Path>>(path: P) -> Result<ValueTables> {
    let text = fs::read_to_string(path.as_ref()).map_err(|source| Error::Io {
        operation: format!("read snapshot '{}'", path.as_ref().display()),
        source,
    })?;
    decode(&text)
}

/// Render all seven tables as snapshot text
pub fn encode(tables: &ValueTables) -> Result<String> {
    let mut out = String::new();
    encode_scalar_block(&mut out, &tables.mc_values)?;
    out.push('\n');
    encode_scalar_block(&mut out, &tables.td_values)?;
    out.push('\n');
    encode_pair_block(&mut out, &tables.q_values)?;
    out.push('\n');
    encode_scalar_block(&mut out, &tables.mc_return_sums)?;
    out.push('\n');
    encode_count_block(&mut out, &tables.mc_counts)?;
    out.push('\n');
    encode_count_block(&mut out, &tables.td_counts)?;
    out.push('\n');
    encode_count_block(&mut out, &tables.q_counts)?;
    Ok(out)
}

/// Parse snapshot text into a fresh set of tables.
///
/// A trailing blank line after the last block is tolerated (writers that end
/// every block with a separator produce one), but the block count itself must
/// be exactly [`BLOCK_COUNT`].
pub fn decode(text: &str) -> Result<ValueTables> {
    let blocks: Vec<&str> = text.trim_end_matches('\n').split("\n\n").collect();
    if blocks.len() != BLOCK_COUNT {
        return Err(Error::SnapshotBlockCount {
            expected: BLOCK_COUNT,
            got: blocks.len(),
        });
    }

    let mut tables = ValueTables::new();
    decode_scalar_block(blocks[0], &mut tables.mc_values)?;
    decode_scalar_block(blocks[1], &mut tables.td_values)?;
    decode_pair_block(blocks[2], &mut tables.q_values)?;
    decode_scalar_block(blocks[3], &mut tables.mc_return_sums)?;
    decode_count_block(blocks[4], &mut tables.mc_counts)?;
    decode_count_block(blocks[5], &mut tables.td_counts)?;
    decode_count_block(blocks[6], &mut tables.q_counts)?;
    Ok(tables)
}

fn encode_scalar_block(out: &mut String, map: &HashMap<State, f64>) -> Result<()> {
    for state in State::all() {
        let value = map.get(&state).ok_or_else(|| Error::UnknownState {
            key: state.key(),
        })?;
        // f64 Display is the shortest representation that parses back exactly.
        let _ = writeln!(out, "{} {}", state.key(), value);
    }
    Ok(())
}

fn encode_pair_block(out: &mut String, map: &HashMap<State, [f64; 2]>) -> Result<()> {
    for state in State::all() {
        let pair = map.get(&state).ok_or_else(|| Error::UnknownState {
            key: state.key(),
        })?;
        let _ = writeln!(out, "{} [{},{}]", state.key(), pair[0], pair[1]);
    }
    Ok(())
}

fn encode_count_block(out: &mut String, map: &HashMap<State, u64>) -> Result<()> {
    for state in State::all() {
        let count = map.get(&state).ok_or_else(|| Error::UnknownState {
            key: state.key(),
        })?;
        let _ = writeln!(out, "{} {}", state.key(), count);
    }
    Ok(())
}

fn split_record(line: &str) -> Result<(State, &str)> {
    let (key, value) = line.split_once(' ').ok_or_else(|| Error::MalformedSnapshotLine {
        line: line.to_string(),
    })?;
    Ok((State::parse_key(key)?, value))
}

fn parse_number(token: &str) -> Result<f64> {
    let value: f64 = token.parse().map_err(|_| Error::MalformedValue {
        token: token.to_string(),
    })?;
    if !value.is_finite() {
        return Err(Error::MalformedValue {
            token: token.to_string(),
        });
    }
    Ok(value)
}

fn parse_pair(token: &str) -> Result<[f64; 2]> {
    let malformed = || Error::MalformedValue {
        token: token.to_string(),
    };
    let inner = token
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(malformed)?;
    let (first, second) = inner.split_once(',').ok_or_else(malformed)?;
    if second.contains(',') {
        return Err(malformed());
    }
    Ok([parse_number(first)?, parse_number(second)?])
}

fn decode_scalar_block(block: &str, map: &mut HashMap<State, f64>) -> Result<()> {
    for line in block.lines() {
        let (state, token) = split_record(line)?;
        map.insert(state, parse_number(token)?);
    }
    Ok(())
}

fn decode_pair_block(block: &str, map: &mut HashMap<State, [f64; 2]>) -> Result<()> {
    for line in block.lines() {
        let (state, token) = split_record(line)?;
        map.insert(state, parse_pair(token)?);
    }
    Ok(())
}

fn decode_count_block(block: &str, map: &mut HashMap<State, u64>) -> Result<()> {
    for line in block.lines() {
        let (state, token) = split_record(line)?;
        let count: u64 = token.parse().map_err(|_| Error::MalformedValue {
            token: token.to_string(),
        })?;
        map.insert(state, count);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blackjack::Action;

    fn populated_tables() -> ValueTables {
        let mut tables = ValueTables::new();
        for (i, state) in State::all().enumerate() {
            let x = (i as f64 + 1.0) / 7.0;
            tables.mc_update(state, x).unwrap();
            tables.mc_update(state, -x / 3.0).unwrap();
            tables.td_update(state, x, -x).unwrap();
            tables.q_update(state, Action::Hit, x, 0.5).unwrap();
            tables.q_update(state, Action::Stand, -x, 0.25).unwrap();
        }
        tables
    }

    fn assert_tables_equal(a: &ValueTables, b: &ValueTables) {
        for state in State::all() {
            assert_eq!(a.mc_value(&state).unwrap(), b.mc_value(&state).unwrap());
            assert_eq!(
                a.mc_return_sum(&state).unwrap(),
                b.mc_return_sum(&state).unwrap()
            );
            assert_eq!(a.mc_count(&state).unwrap(), b.mc_count(&state).unwrap());
            assert_eq!(a.td_value(&state).unwrap(), b.td_value(&state).unwrap());
            assert_eq!(a.td_count(&state).unwrap(), b.td_count(&state).unwrap());
            assert_eq!(a.q_pair(&state).unwrap(), b.q_pair(&state).unwrap());
            assert_eq!(a.q_count(&state).unwrap(), b.q_count(&state).unwrap());
        }
    }

    #[test]
    fn test_round_trip_is_exact() {
        let tables = populated_tables();
        let decoded = decode(&encode(&tables).unwrap()).unwrap();
        assert_tables_equal(&tables, &decoded);
    }

    #[test]
    fn test_fresh_tables_encode_as_zeros() {
        let text = encode(&ValueTables::new()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("(0,0,0) 0"));
        assert_eq!(lines.next(), Some("(1,0,0) 0"));
        assert_eq!(lines.next(), Some("(2,0,1) 0"));
    }

    #[test]
    fn test_shape_is_seven_blocks_of_full_domain() {
        let text = encode(&ValueTables::new()).unwrap();
        let blocks: Vec<&str> = text.trim_end_matches('\n').split("\n\n").collect();
        assert_eq!(blocks.len(), BLOCK_COUNT);
        for block in blocks {
            assert_eq!(block.lines().count(), State::all().count());
        }
        // The Q block renders pairs.
        assert!(text.contains("(0,0,0) [0,0]"));
    }

    #[test]
    fn test_trailing_blank_line_is_tolerated() {
        let tables = populated_tables();
        let mut text = encode(&tables).unwrap();
        text.push('\n');
        let decoded = decode(&text).unwrap();
        assert_tables_equal(&tables, &decoded);
    }

    #[test]
    fn test_wrong_block_count_is_rejected() {
        assert!(matches!(
            decode(""),
            Err(Error::SnapshotBlockCount { got: 1, .. })
        ));

        let text = encode(&ValueTables::new()).unwrap();
        let truncated = text.split("\n\n").take(6).collect::<Vec<_>>().join("\n\n");
        assert!(matches!(
            decode(&truncated),
            Err(Error::SnapshotBlockCount { got: 6, .. })
        ));
    }

    #[test]
    fn test_malformed_key_is_rejected() {
        let text = encode(&ValueTables::new())
            .unwrap()
            .replacen("(0,0,0)", "(0,0", 1);
        assert!(matches!(
            decode(&text),
            Err(Error::MalformedStateKey { .. })
        ));
    }

    #[test]
    fn test_out_of_domain_key_is_rejected() {
        let text = encode(&ValueTables::new())
            .unwrap()
            .replacen("(2,0,1)", "(99,0,1)", 1);
        assert!(matches!(decode(&text), Err(Error::UnknownState { .. })));
    }

    #[test]
    fn test_malformed_value_is_rejected() {
        let text = encode(&ValueTables::new())
            .unwrap()
            .replacen("(0,0,0) 0", "(0,0,0) zero", 1);
        assert!(matches!(decode(&text), Err(Error::MalformedValue { .. })));

        let text = encode(&ValueTables::new())
            .unwrap()
            .replacen("(0,0,0) [0,0]", "(0,0,0) [0,0,0]", 1);
        assert!(matches!(decode(&text), Err(Error::MalformedValue { .. })));
    }

    #[test]
    fn test_non_finite_value_is_rejected() {
        let text = encode(&ValueTables::new())
            .unwrap()
            .replacen("(0,0,0) 0\n", "(0,0,0) inf\n", 1);
        assert!(matches!(decode(&text), Err(Error::MalformedValue { .. })));
    }
}
