use rs_lm_core::io::read_corpus;
use rs_lm_core::model::language_model::LanguageModel;

/// Fallback used when ./data/corpus.txt is absent, so the demo always
/// has something to learn from.
const FALLBACK_CORPUS: &str = "the quick brown fox jumps over the lazy dog. \
    pack my box with five dozen liquor jugs. \
    sphinx of black quartz, judge my vow. \
    how vexingly quick daft zebras jump. \
    the five boxing wizards jump quickly.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load the training text from the "data" directory
    // Newlines and spaces are corpus characters like any other; nothing
    // is lowercased or normalized
    let corpus = read_corpus("./data/corpus.txt").unwrap_or_else(|_| FALLBACK_CORPUS.to_owned());

    // A seeded model: same seed + same corpus + same calls -> the same
    // texts on every run. Use LanguageModel::new(window_length) instead
    // to seed from OS entropy and get different texts each time
    let window_length = 3;
    let mut model = LanguageModel::with_seed(window_length, 20);

    // One training pass: counts first, then probabilities
    model.train(corpus.chars())?;
    println!("Trained {} windows of length {}", model.len(), model.window_length());

    // Training on a corpus shorter than the window is the one error the
    // model can raise
    let mut broken = LanguageModel::with_seed(10, 0);
    match broken.train("abc".chars()) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("A 3-character corpus cannot fill a 10-character window: {e}"),
    }

    // An initial text shorter than the window (or already at the target
    // length) comes back unchanged; generation never fails
    println!("Too short to extend: {:?}", model.generate("ab", 50));

    // Start generation from the first window of the corpus
    let initial: String = corpus.chars().take(window_length).collect();

    // Generate 10 texts; each draw continues the model's single random
    // stream, so the texts differ from each other but the whole sequence
    // replays identically on the next run
    for i in 0..10 {
        println!("Generated text {}: {:?}", i + 1, model.generate(&initial, 60));
    }

    // A tiny model makes the dump format visible: one line per window,
    // entries as (char count probability cumulative) in the order each
    // character was first observed
    let mut tiny = LanguageModel::with_seed(1, 20);
    tiny.train("aaab".chars())?;
    print!("{tiny}");

    Ok(())
}
