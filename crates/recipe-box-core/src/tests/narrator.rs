use crate::{
    NarrationState, NarrationTarget, RecipeId, StepNarrator, utterance,
    tests::{RecordingSpeech, SharedSpeech, SpeechCall},
};

fn target(id: &str, steps: &[&str]) -> NarrationTarget {
    NarrationTarget {
        recipe_id: Some(RecipeId::from(id)),
        title: Some("Soup".to_string()),
        steps: steps.iter().map(|s| s.to_string()).collect(),
    }
}

fn narrator_with(steps: &[&str]) -> StepNarrator<RecordingSpeech> {
    let mut narrator = StepNarrator::new(RecordingSpeech::default());
    narrator.load(target("soup", steps));
    narrator
}

/// WHAT: Next and previous move one step and clamp at both ends
/// WHY: The index must stay within the step list
#[test]
fn given_three_steps_when_navigating_then_index_clamped() {
    // Given: Steps chop, boil, serve at index 0
    let mut narrator = narrator_with(&["chop", "boil", "serve"]);

    // When / Then: next -> 1, previous -> 0, previous -> 0
    narrator.next();
    assert_eq!(narrator.current_index(), 1);
    narrator.previous();
    assert_eq!(narrator.current_index(), 0);
    narrator.previous();
    assert_eq!(narrator.current_index(), 0);

    // When / Then: next past the end stays on the last step
    narrator.next();
    narrator.next();
    narrator.next();
    assert_eq!(narrator.current_index(), 2);
    assert_eq!(narrator.current_step(), Some("serve"));
}

/// WHAT: Start cancels pending speech then speaks the current step
/// WHY: Narration must not overlap
#[test]
fn given_stopped_narrator_when_starting_then_cancels_and_speaks_current() {
    // Given: A stopped narrator with steps
    let mut narrator = narrator_with(&["chop", "boil"]);
    let baseline = narrator.speech().calls.len();

    // When: Starting
    narrator.start();

    // Then: Playing, with cancel followed by the first step
    assert_eq!(narrator.state(), NarrationState::Playing);
    assert_eq!(
        narrator.speech().calls[baseline..],
        [
            SpeechCall::Cancel,
            SpeechCall::Speak("Soup, step 1. chop".to_string())
        ]
    );
}

/// WHAT: Moving while playing re-speaks only when the index changed
/// WHY: Clamped moves must not repeat the current step
#[test]
fn given_playing_narrator_when_moving_then_speaks_only_on_actual_move() {
    // Given: A playing narrator on a two-step recipe
    let mut narrator = narrator_with(&["chop", "boil"]);
    narrator.start();

    // When: Advancing twice (second is clamped)
    narrator.next();
    narrator.next();

    // Then: Only two utterances total were spoken
    assert_eq!(
        narrator.speech().spoken(),
        vec!["Soup, step 1. chop", "Soup, step 2. boil"]
    );
    assert!(narrator.is_playing());
}

/// WHAT: Moving while stopped only updates the index
/// WHY: Navigation alone never produces audio
#[test]
fn given_stopped_narrator_when_moving_then_silent() {
    // Given: A stopped narrator
    let mut narrator = narrator_with(&["chop", "boil"]);

    // When: Navigating
    narrator.next();

    // Then: Nothing was spoken
    assert!(narrator.speech().spoken().is_empty());
    assert_eq!(narrator.current_index(), 1);
}

/// WHAT: Stop cancels speech and returns to Stopped
/// WHY: The user must be able to silence narration at any time
#[test]
fn given_playing_narrator_when_stopping_then_cancelled_and_stopped() {
    // Given: A playing narrator
    let mut narrator = narrator_with(&["chop"]);
    narrator.start();

    // When: Stopping
    narrator.stop();

    // Then: State is Stopped and the last call was a cancel
    assert_eq!(narrator.state(), NarrationState::Stopped);
    assert_eq!(narrator.speech().calls.last(), Some(&SpeechCall::Cancel));
}

/// WHAT: A different recipe or step list resets index and playback
/// WHY: Narration belongs to the displayed recipe only
#[test]
fn given_playing_mid_recipe_when_target_changes_then_reset() {
    // Given: A narrator playing step 2 of recipe "soup"
    let mut narrator = narrator_with(&["chop", "boil", "serve"]);
    narrator.start();
    narrator.next();

    // When: Loading a different recipe
    let reset = narrator.load(target("cake", &["mix"]));

    // Then: Back to step 0, stopped, with speech cancelled
    assert!(reset);
    assert_eq!(narrator.current_index(), 0);
    assert!(!narrator.is_playing());
    assert_eq!(narrator.speech().calls.last(), Some(&SpeechCall::Cancel));

    // When: Same recipe id but edited steps
    narrator.next();
    let reset = narrator.load(target("cake", &["mix", "bake"]));

    // Then: Reset again
    assert!(reset);
    assert_eq!(narrator.current_index(), 0);
}

/// WHAT: Reloading the same recipe keeps the position
/// WHY: Re-rendering an unchanged recipe must not interrupt narration
#[test]
fn given_same_target_when_reloaded_then_position_kept() {
    // Given: A playing narrator on step 2
    let mut narrator = narrator_with(&["chop", "boil"]);
    narrator.start();
    narrator.next();

    // When: Loading the same id and steps with a new title
    let mut same = target("soup", &["chop", "boil"]);
    same.title = Some("Broth".to_string());
    let reset = narrator.load(same);

    // Then: No reset, title updated
    assert!(!reset);
    assert_eq!(narrator.current_index(), 1);
    assert!(narrator.is_playing());
    assert_eq!(narrator.target().title.as_deref(), Some("Broth"));
}

/// WHAT: Start with no steps does nothing
/// WHY: There is nothing to narrate
#[test]
fn given_no_steps_when_starting_or_moving_then_no_op() {
    // Given: A narrator with an empty step list
    let mut narrator = narrator_with(&[]);

    // When: Starting and navigating
    narrator.start();
    narrator.next();
    narrator.previous();

    // Then: Still stopped at 0 and silent
    assert_eq!(narrator.state(), NarrationState::Stopped);
    assert_eq!(narrator.current_index(), 0);
    assert!(narrator.speech().spoken().is_empty());
}

/// WHAT: Missing speech capability is a silent no-op
/// WHY: Narration degrades gracefully where TTS does not exist
#[test]
fn given_unavailable_speech_when_starting_then_state_changes_but_nothing_spoken() {
    // Given: A backend reporting itself unavailable
    let speech = RecordingSpeech {
        unavailable: true,
        ..RecordingSpeech::default()
    };
    let mut narrator = StepNarrator::new(speech);
    narrator.load(target("soup", &["chop", "boil"]));

    // When: Starting and advancing
    narrator.start();
    narrator.next();

    // Then: State follows the commands and nothing is spoken
    assert!(narrator.is_playing());
    assert_eq!(narrator.current_index(), 1);
    assert!(narrator.speech().spoken().is_empty());
}

/// WHAT: Backend errors are swallowed
/// WHY: Speech failures must never reach the caller
#[test]
fn given_failing_speech_when_starting_then_still_playing() {
    // Given: A backend that fails every speak
    let speech = RecordingSpeech {
        failing: true,
        ..RecordingSpeech::default()
    };
    let mut narrator = StepNarrator::new(speech);
    narrator.load(target("soup", &["chop"]));

    // When: Starting
    narrator.start();

    // Then: The narrator still reports Playing
    assert!(narrator.is_playing());
}

/// WHAT: Utterances fall back to a generic title
/// WHY: Untitled recipes still need an intelligible prompt
#[test]
fn given_missing_title_when_building_utterance_then_fallback_used() {
    // Given / When: Building utterances with and without a title
    let titled = utterance(Some("Soup"), 0, "chop");
    let blank = utterance(Some("  "), 2, "serve");
    let missing = utterance(None, 1, "boil");

    // Then: 1-based step numbers and a fallback title
    assert_eq!(titled, "Soup, step 1. chop");
    assert_eq!(blank, "Recipe, step 3. serve");
    assert_eq!(missing, "Recipe, step 2. boil");
}

/// WHAT: Dropping the narrator cancels speech
/// WHY: Narration must not outlive the displayed recipe
#[test]
fn given_playing_narrator_when_dropped_then_speech_cancelled() {
    // Given: A playing narrator over a backend the test can still inspect
    let speech = SharedSpeech::default();
    let mut narrator = StepNarrator::new(speech.clone());
    narrator.load(target("soup", &["chop", "boil"]));
    narrator.start();

    // When: Dropping the narrator
    drop(narrator);

    // Then: The last call reaching the backend is a cancel
    assert_eq!(speech.calls().last(), Some(&SpeechCall::Cancel));
}

/// WHAT: Stop still cancels after the backend became unavailable
/// WHY: Utterances started earlier must not keep playing
#[test]
fn given_backend_lost_while_playing_when_stopping_then_cancel_issued() {
    // Given: A playing narrator whose backend then goes unavailable
    let speech = SharedSpeech::default();
    let mut narrator = StepNarrator::new(speech.clone());
    narrator.load(target("soup", &["chop", "boil"]));
    narrator.start();
    speech.set_unavailable();

    // When: Advancing and stopping
    narrator.next();
    narrator.stop();

    // Then: Nothing new is spoken, but the cancel reaches the backend
    assert_eq!(speech.calls().last(), Some(&SpeechCall::Cancel));
    assert_eq!(
        speech
            .calls()
            .iter()
            .filter(|c| matches!(c, SpeechCall::Speak(_)))
            .count(),
        1
    );
    assert!(!narrator.is_playing());
}
