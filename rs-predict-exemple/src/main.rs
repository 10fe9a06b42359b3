use std::sync::Arc;

use rs_predict_core::model::corrector::Corrector;
use rs_predict_core::model::predictor::Predictor;
use rs_predict_core::model::trainer::Trainer;

fn main() {
    // Train a model from a small in-memory corpus
    // One sentence per entry, tokens separated by whitespace
    let model = Trainer::train([
        "the cat sat on the mat",
        "the cat ran across the yard",
        "the dog sat on the porch",
        "a bird sat on the fence",
    ]);
    let model = Arc::new(model);

    // The predictor memoizes the zero-context fallback ranking once,
    // then serves read-only queries
    let predictor = Predictor::new(Arc::clone(&model));

    // Two or more context words select the trigram table (last two words)
    println!("After 'the cat': {:?}", predictor.predict_next("the cat", 3));

    // A single context word selects the bigram table
    println!("After 'the': {:?}", predictor.predict_next("the", 3));

    // An empty context falls back to the most frequent followers overall
    println!("No context: {:?}", predictor.predict_next("", 3));

    // An unseen context returns an empty list, never an error
    println!("After 'zebra': {:?}", predictor.predict_next("zebra", 3));

    // The corrector scans the same vocabulary by edit distance
    let corrector = Corrector::new(model);

    // 'cta' is within distance 2 of 'cat'
    println!("'cta' corrects to: {}", corrector.autocorrect("cta", 2));

    // A vocabulary word is always returned unchanged
    println!("'fence' corrects to: {}", corrector.autocorrect("fence", 2));

    // Nothing within the bound: the input comes back unchanged
    println!("'xylophone' corrects to: {}", corrector.autocorrect("xylophone", 2));
}
