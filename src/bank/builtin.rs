//! Default statements shipped with the crate

use super::{Axis, Item, Pole};

const STATEMENTS: &[(&str, Axis, Pole, &str)] = &[
    ("q01", Axis::MP, Pole::R, "I study hardest when there is a ranking to climb."),
    ("q02", Axis::MP, Pole::L, "Understanding a topic deeply matters more to me than the grade."),
    ("q03", Axis::MP, Pole::R, "I like being able to show others what I have achieved."),
    ("q04", Axis::MP, Pole::L, "I enjoy practising a skill even when nobody will see the result."),
    ("q05", Axis::MP, Pole::R, "Beating a rival motivates me more than beating my own record."),
    ("q06", Axis::MP, Pole::L, "I would pick a hard course I can learn from over an easy top mark."),
    ("q07", Axis::AS, Pole::R, "Before trying something new I think through what could go wrong."),
    ("q08", Axis::AS, Pole::L, "I chase big opportunities even when the odds are uncertain."),
    ("q09", Axis::AS, Pole::R, "I prefer a stable path with a clear guarantee at the end."),
    ("q10", Axis::AS, Pole::L, "Picturing my ideal future drives me more than avoiding failure."),
    ("q11", Axis::AS, Pole::R, "I double-check my work so that I do not lose points."),
    ("q12", Axis::AS, Pole::L, "I would rather take a bold risk than regret never trying."),
    ("q13", Axis::CU, Pole::R, "Complex, novel ideas excite me more than simple, proven ones."),
    ("q14", Axis::CU, Pole::L, "I trust methods that have worked well for others before me."),
    ("q15", Axis::CU, Pole::R, "I enjoy questioning rules that everyone else accepts."),
    ("q16", Axis::CU, Pole::L, "Tradition and reputation weigh heavily when I make choices."),
    ("q17", Axis::CU, Pole::R, "I am drawn to unusual hobbies and niche communities."),
    ("q18", Axis::CU, Pole::L, "I feel most comfortable following a well-defined plan."),
    ("q19", Axis::IN, Pole::R, "I make new friends on a regular basis."),
    ("q20", Axis::IN, Pole::L, "I do my best thinking alone."),
    ("q21", Axis::IN, Pole::R, "Arguments that resonate emotionally persuade me more than dry facts."),
    ("q22", Axis::IN, Pole::L, "I would rather finish a project solo than coordinate a team."),
    ("q23", Axis::IN, Pole::R, "Group events leave me energised rather than drained."),
    ("q24", Axis::IN, Pole::L, "I keep a small circle of close friends rather than a wide network."),
];

pub(super) fn items() -> Vec<Item> {
    STATEMENTS
        .iter()
        .map(|&(id, axis, pole, text)| Item::new(id, axis, pole).with_text(text))
        .collect()
}
