use rand::Rng;

const FIRST_PARTS: [&str; 120] = [
    "Al", "An", "Ar", "Bal", "Bar", "Bel", "Bor", "Bran", "Cal", "Cam", "Car", "Cham", "Cor",
    "Dal", "Dan", "Dar", "Der", "Dom", "Dor", "Dra", "Dur", "El", "Er", "Far", "Fal", "Fel",
    "Fin", "Gar", "Gal", "Gan", "Ger", "Gil", "Gor", "Gra", "Hal", "Han", "Har", "Hel", "Hor",
    "Il", "In", "Ir", "Jal", "Jar", "Jul", "Kag", "Kal", "Kel", "Kha", "Kol", "Kor", "Kra",
    "Kur", "Lan", "Leo", "Lor", "Mal", "Mar", "Mer", "Mir", "Mor", "Nar", "Ner", "Nor", "Orl",
    "Orm", "Par", "Per", "Pol", "Por", "Qar", "Qor", "Rad", "Rag", "Ran", "Ren", "Rha", "Rol",
    "Ron", "Sal", "Sam", "Sar", "Sel", "Ser", "Sha", "Sol", "Sul", "Syl", "Tal", "Tam", "Tar",
    "Tel", "Thal", "Thar", "Ther", "Tir", "Tor", "Tul", "Tur", "Ul", "Val", "Van", "Var", "Vir",
    "Vor", "Xal", "Xar", "Xen", "Xer", "Yar", "Yen", "Yor", "Yr", "Zal", "Zan", "Zel", "Zen",
    "Zer", "Zor", "Zur",
];

const LAST_PARTS: [&str; 80] = [
    "adur", "amar", "amon", "anis", "arian", "arion", "astar", "aster", "azar", "bard", "baros",
    "beros", "born", "breaker", "caster", "dar", "del", "dian", "dor", "doron", "dras", "duin",
    "elor", "emar", "eron", "essar", "far", "fornia", "gant", "garn", "geos", "ghar", "heim",
    "herys", "idus", "igar", "illius", "inas", "ion", "ious", "iros", "isor", "ith", "lach",
    "lan", "lar", "lian", "lis", "loth", "lune", "mar", "moor", "narth", "neth", "nir", "nius",
    "oth", "pheus", "phyra", "polis", "quar", "ras", "rin", "roth", "ryn", "seer", "shan",
    "sian", "soris", "star", "stian", "thalos", "thar", "tor", "varen", "varin", "vius", "wyn",
    "xath", "ynor",
];

const GREEK_LETTERS: [&str; 24] = [
    "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Eta", "Theta", "Iota", "Kappa",
    "Lambda", "Mu", "Nu", "Xi", "Omicron", "Pi", "Rho", "Sigma", "Tau", "Upsilon", "Phi", "Chi",
    "Psi", "Omega",
];

const SYSTEM_SUFFIXES: [&str; 15] = [
    "Prime", "Major", "Minor", "Secundus", "Tertius", "Quartus", "Quintus", "A", "B", "C", "I",
    "II", "III", "IV", "V",
];

fn pick<'a, R: Rng>(rng: &mut R, bank: &[&'a str]) -> &'a str {
    bank[rng.gen_range(0..bank.len())]
}

/// Syllable surname: either a first part and an ending ("Kalmoor") or two
/// first parts ("Torzen").
pub fn surname<R: Rng>(rng: &mut R) -> String {
    let head = pick(rng, &FIRST_PARTS);
    if rng.gen_bool(0.2) || rng.gen_bool(0.5) {
        format!("{}{}", head, pick(rng, &LAST_PARTS))
    } else {
        format!("{}{}", head, pick(rng, &FIRST_PARTS).to_lowercase())
    }
}

/// "<Greek letter> <surname>", with an even chance of a trailing suffix.
pub fn system_name<R: Rng>(rng: &mut R) -> String {
    let mut name = format!("{} {}", pick(rng, &GREEK_LETTERS), surname(rng));
    if rng.gen_bool(0.5) {
        name.push(' ');
        name.push_str(pick(rng, &SYSTEM_SUFFIXES));
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn system_names_start_with_a_greek_letter() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let name = system_name(&mut rng);
            let words: Vec<&str> = name.split(' ').collect();
            assert!(GREEK_LETTERS.contains(&words[0]), "{}", name);
            assert!(words.len() == 2 || words.len() == 3, "{}", name);
            if words.len() == 3 {
                assert!(SYSTEM_SUFFIXES.contains(&words[2]), "{}", name);
            }
        }
    }

    #[test]
    fn surnames_are_capitalized_single_words() {
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..100 {
            let name = surname(&mut rng);
            assert!(!name.contains(' '));
            assert!(name.chars().next().unwrap().is_uppercase());
            assert!(name.chars().skip(1).all(|c| c.is_lowercase()), "{}", name);
        }
    }
}
