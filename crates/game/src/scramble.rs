use rand::{
    seq::{IndexedRandom, SliceRandom},
    Rng,
};

/// Uniformly random permutation of `word`'s characters.
///
/// The result may equal the input; words of zero or one character always do.
pub fn scramble<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String {
    let mut chars: Vec<char> = word.chars().collect();
    chars.shuffle(rng);
    chars.into_iter().collect()
}

/// Uniform choice with replacement. `None` only for an empty list.
pub fn pick_word<R: Rng + ?Sized>(words: &[&'static str], rng: &mut R) -> Option<&'static str> {
    words.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::WordBank;

    fn sorted(word: &str) -> Vec<char> {
        let mut chars: Vec<char> = word.chars().collect();
        chars.sort_unstable();
        chars
    }

    #[test]
    fn every_bank_word_scrambles_to_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        for category in WordBank::builtin().categories() {
            for word in category.words {
                for _ in 0..20 {
                    let scrambled = scramble(word, &mut rng);
                    assert_eq!(scrambled.len(), word.len());
                    assert_eq!(sorted(&scrambled), sorted(word), "{word} -> {scrambled}");
                }
            }
        }
    }

    #[test]
    fn short_words_come_back_unchanged() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(scramble("", &mut rng), "");
        assert_eq!(scramble("a", &mut rng), "a");
    }

    #[test]
    fn multibyte_characters_stay_intact() {
        let mut rng = StdRng::seed_from_u64(3);
        let scrambled = scramble("çaé", &mut rng);
        assert_eq!(sorted(&scrambled), sorted("çaé"));
    }

    #[test]
    fn all_orderings_of_three_letters_show_up_evenly() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts: HashMap<String, u32> = HashMap::new();
        for _ in 0..6_000 {
            *counts.entry(scramble("abc", &mut rng)).or_default() += 1;
        }
        assert_eq!(counts.len(), 6);
        for (ordering, count) in counts {
            assert!((800..1200).contains(&count), "{ordering}: {count}");
        }
    }

    #[test]
    fn pick_word_stays_inside_the_list_and_covers_it() {
        let words = WordBank::builtin().words_for("Colors").expect("colors");
        let mut rng = StdRng::seed_from_u64(9);
        let mut seen = Vec::new();
        for _ in 0..500 {
            let word = pick_word(words, &mut rng).expect("non-empty");
            assert!(words.contains(&word));
            if !seen.contains(&word) {
                seen.push(word);
            }
        }
        assert_eq!(seen.len(), words.len());
        assert_eq!(pick_word(&[], &mut rng), None);
    }
}
