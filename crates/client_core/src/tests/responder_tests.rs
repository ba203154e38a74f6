use super::*;

fn builtin_responder() -> LookupResponder {
    LookupResponder::from_knowledge(&KnowledgeBase::builtin())
}

fn instruction_for(responder: &LookupResponder, keyword: &str) -> String {
    responder
        .entries()
        .iter()
        .find(|entry| entry.keyword == keyword)
        .map(|entry| entry.instruction.clone())
        .expect("keyword present")
}

#[test]
fn exact_match_ignores_case_and_whitespace() {
    let responder = builtin_responder();
    for entry in responder.entries() {
        let shouted = format!("  {}\n", entry.keyword.to_uppercase());
        assert_eq!(responder.respond(&shouted), entry.instruction);
    }
}

#[test]
fn plastic_bottle_sentence_goes_to_plastic_bin() {
    let responder = builtin_responder();
    assert_eq!(
        responder.respond("I have a plastic bottle"),
        "Recycle in the Plastic Bin (rinse first!)."
    );
}

#[test]
fn contained_keyword_returns_its_instruction() {
    let responder = builtin_responder();
    assert_eq!(
        responder.respond("where does an old newspaper go?"),
        "Recycle in the Paper Bin."
    );
    assert_eq!(
        responder.respond("Greasy PIZZA BOX from last night"),
        "Recycle in the Compost Bin (if greasy)."
    );
}

#[test]
fn empty_and_whitespace_input_fall_back() {
    let responder = builtin_responder();
    assert_eq!(responder.respond(""), FALLBACK_REPLY);
    assert_eq!(responder.respond("   \t\n"), FALLBACK_REPLY);
}

#[test]
fn unknown_item_falls_back() {
    let responder = builtin_responder();
    assert_eq!(responder.respond("a broken umbrella"), FALLBACK_REPLY);
    assert!(responder.lookup("a broken umbrella").is_none());
}

#[test]
fn longest_contained_keyword_wins() {
    let responder = builtin_responder();
    let entry = responder.lookup("my soda can is empty").expect("match");
    assert_eq!(entry.keyword, "soda can");
}

#[test]
fn overlapping_keywords_resolve_deterministically() {
    let responder = LookupResponder::new([
        RecyclingEntry::new("bottle", "generic"),
        RecyclingEntry::new("glass bottle", "glass"),
        RecyclingEntry::new("glass", "glass only"),
    ]);
    for _ in 0..10 {
        assert_eq!(responder.respond("a green glass bottle"), "glass");
    }
}

#[test]
fn equal_length_keywords_prefer_declaration_order() {
    let responder = LookupResponder::new([
        RecyclingEntry::new("jar", "first"),
        RecyclingEntry::new("lid", "second"),
    ]);
    assert_eq!(responder.respond("jar with lid"), "first");
    assert_eq!(responder.respond("lid on a jar"), "first");
}

#[test]
fn plural_cans_match_metal_bin() {
    let responder = builtin_responder();
    let metal = instruction_for(&responder, "can");
    assert_eq!(responder.respond("tin cans"), metal);
    assert_eq!(responder.respond("Soda Cans"), instruction_for(&responder, "soda can"));
}

#[test]
fn plural_rule_applies_to_keywords_ending_in_can() {
    let responder = LookupResponder::new([
        RecyclingEntry::new("paint can", "take to hazardous waste"),
        RecyclingEntry::new("bottle", "plastic"),
    ]);
    assert_eq!(responder.respond("three cans"), "take to hazardous waste");
    assert_eq!(responder.respond("a can"), FALLBACK_REPLY);
}

#[test]
fn any_matching_instruction_is_from_the_valid_set() {
    let responder = builtin_responder();
    let valid = [
        instruction_for(&responder, "glass bottle"),
        instruction_for(&responder, "plastic bottle"),
    ];
    let reply = responder.respond("a plastic bottle and a glass bottle");
    assert!(valid.iter().any(|instruction| instruction == reply));
}

#[test]
fn duplicate_and_empty_keywords_are_skipped() {
    let responder = LookupResponder::new([
        RecyclingEntry::new("  ", "matches everything"),
        RecyclingEntry::new("Cup", "first"),
        RecyclingEntry::new("cup", "second"),
    ]);
    assert_eq!(responder.entries().len(), 1);
    assert_eq!(responder.respond("paper cup"), "first");
    assert_eq!(responder.respond("umbrella"), FALLBACK_REPLY);
}

#[test]
fn suggestions_follow_declared_order() {
    let responder = builtin_responder();
    assert_eq!(
        responder.suggestions("bott"),
        vec!["plastic bottle", "glass bottle"]
    );
    assert_eq!(responder.suggestions("CAN"), vec!["soda can", "can"]);
    assert!(responder.suggestions("  ").is_empty());
    assert!(responder.suggestions("umbrella").is_empty());
}
