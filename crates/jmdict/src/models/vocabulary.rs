//! Controlled vocabularies for sense classification.
//!
//! Each category is a closed enum backed by one static table mapping the
//! variant to its entity code in the source file (`ksb`, `comp`, `uk`, ...)
//! and to the human-readable name declared by the dictionary's DTD.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::VocabularyError;

/// Category of a sense tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagCategory {
  /// Regional dialect (`<dial>`)
  Dialect,
  /// Subject field (`<field>`)
  Field,
  /// Usage / register (`<misc>`)
  Misc,
}

impl TagCategory {
  /// Name of the sense child element carrying this category.
  pub fn element(&self) -> &'static str {
    match self {
      TagCategory::Dialect => "dial",
      TagCategory::Field => "field",
      TagCategory::Misc => "misc",
    }
  }
}

impl fmt::Display for TagCategory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let label = match self {
      TagCategory::Dialect => "dialect",
      TagCategory::Field => "field",
      TagCategory::Misc => "misc",
    };
    f.write_str(label)
  }
}

/// Common interface of the controlled-vocabulary enums.
pub trait Vocabulary: Copy + Ord + fmt::Debug + 'static {
  /// Category this vocabulary classifies.
  const CATEGORY: TagCategory;

  /// Every member, in declaration order.
  fn all() -> &'static [Self];

  /// Entity code used in the source file.
  fn code(self) -> &'static str;

  /// Human-readable name.
  fn name(self) -> &'static str;

  /// Looks up a member by its entity code (exact, case-sensitive).
  fn from_code(code: &str) -> Option<Self>;

  /// Like [`from_code`](Self::from_code), reporting a miss as a vocabulary error.
  fn parse_code(code: &str) -> Result<Self, VocabularyError> {
    Self::from_code(code).ok_or_else(|| VocabularyError::MissingControlledVocabulary {
      category: Self::CATEGORY,
      token: code.to_string(),
    })
  }
}

macro_rules! controlled_vocabulary {
  (
    $(#[$meta:meta])*
    $name:ident: $category:expr;
    $( $variant:ident => ($code:literal, $display:literal), )+
  ) => {
    $(#[$meta])*
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub enum $name {
      $(
        #[doc = $display]
        $variant,
      )+
    }

    impl $name {
      const TABLE: &'static [($name, &'static str, &'static str)] = &[
        $( ($name::$variant, $code, $display), )+
      ];
    }

    impl Vocabulary for $name {
      const CATEGORY: TagCategory = $category;

      fn all() -> &'static [Self] {
        &[ $( $name::$variant, )+ ]
      }

      fn code(self) -> &'static str {
        Self::TABLE[self as usize].1
      }

      fn name(self) -> &'static str {
        Self::TABLE[self as usize].2
      }

      fn from_code(code: &str) -> Option<Self> {
        Self::TABLE.iter().find(|(_, c, _)| *c == code).map(|(v, _, _)| *v)
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
      }
    }

    impl Serialize for $name {
      fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
      }
    }

    impl<'de> Deserialize<'de> for $name {
      fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        $name::from_code(&code).ok_or_else(|| {
          serde::de::Error::custom(format!("unknown {} code: {code}", $category))
        })
      }
    }
  };
}

controlled_vocabulary! {
  /// Regional dialect of a sense.
  Dialect: TagCategory::Dialect;
  Brazilian => ("bra", "Brazilian"),
  Hokkaido => ("hob", "Hokkaido-ben"),
  Kansai => ("ksb", "Kansai-ben"),
  Kantou => ("ktb", "Kantou-ben"),
  Kyoto => ("kyb", "Kyoto-ben"),
  Kyuushuu => ("kyu", "Kyuushuu-ben"),
  Nagano => ("nab", "Nagano-ben"),
  Osaka => ("osb", "Osaka-ben"),
  Ryuukyuu => ("rkb", "Ryuukyuu-ben"),
  Touhoku => ("thb", "Touhoku-ben"),
  Tosa => ("tsb", "Tosa-ben"),
  Tsugaru => ("tsug", "Tsugaru-ben"),
}

controlled_vocabulary! {
  /// Subject field of a sense.
  Field: TagCategory::Field;
  Agriculture => ("agric", "agriculture"),
  Anatomy => ("anat", "anatomy"),
  Archeology => ("archeol", "archeology"),
  Architecture => ("archit", "architecture"),
  Art => ("art", "art, aesthetics"),
  Astronomy => ("astron", "astronomy"),
  AudioVisual => ("audvid", "audiovisual"),
  Aviation => ("aviat", "aviation"),
  Baseball => ("baseb", "baseball"),
  Biochemistry => ("biochem", "biochemistry"),
  Biology => ("biol", "biology"),
  Botany => ("bot", "botany"),
  Boxing => ("boxing", "boxing"),
  Buddhism => ("Buddh", "Buddhism"),
  Business => ("bus", "business"),
  CardGames => ("cards", "card games"),
  Chemistry => ("chem", "chemistry"),
  ChineseMythology => ("chmyth", "Chinese mythology"),
  Christianity => ("Christn", "Christianity"),
  CivilEngineering => ("civeng", "civil engineering"),
  Clothing => ("cloth", "clothing"),
  Computing => ("comp", "computing"),
  Crystallography => ("cryst", "crystallography"),
  Dentistry => ("dent", "dentistry"),
  Ecology => ("ecol", "ecology"),
  Economics => ("econ", "economics"),
  Electricity => ("elec", "electricity, elec. eng."),
  Electronics => ("electr", "electronics"),
  Embryology => ("embryo", "embryology"),
  Engineering => ("engr", "engineering"),
  Entomology => ("ent", "entomology"),
  Film => ("film", "film"),
  Finance => ("finc", "finance"),
  Fishing => ("fish", "fishing"),
  Food => ("food", "food, cooking"),
  Gardening => ("gardn", "gardening, horticulture"),
  Genetics => ("genet", "genetics"),
  Geography => ("geogr", "geography"),
  Geology => ("geol", "geology"),
  Geometry => ("geom", "geometry"),
  Go => ("go", "go (game)"),
  Golf => ("golf", "golf"),
  Grammar => ("gramm", "grammar"),
  GreekMythology => ("grmyth", "Greek mythology"),
  Hanafuda => ("hanaf", "hanafuda"),
  HorseRacing => ("horse", "horse racing"),
  Kabuki => ("kabuki", "kabuki"),
  Law => ("law", "law"),
  Linguistics => ("ling", "linguistics"),
  Logic => ("logic", "logic"),
  MartialArts => ("MA", "martial arts"),
  Mahjong => ("mahj", "mahjong"),
  Manga => ("manga", "manga"),
  Mathematics => ("math", "mathematics"),
  Mechanics => ("mech", "mechanical engineering"),
  Medicine => ("med", "medicine"),
  Meteorology => ("met", "meteorology"),
  Military => ("mil", "military"),
  Mining => ("mining", "mining"),
  Motorsport => ("motor", "motorsport"),
  Music => ("music", "music"),
  Noh => ("noh", "noh"),
  Ornithology => ("ornith", "ornithology"),
  Paleontology => ("paleo", "paleontology"),
  Pathology => ("pathol", "pathology"),
  Pharmacology => ("pharm", "pharmacology"),
  Philosophy => ("phil", "philosophy"),
  Photography => ("photo", "photography"),
  Physics => ("physics", "physics"),
  Physiology => ("physiol", "physiology"),
  Politics => ("politics", "politics"),
  Printing => ("print", "printing"),
  ProfessionalWrestling => ("prowres", "professional wrestling"),
  Psychiatry => ("psy", "psychiatry"),
  Psychoanalysis => ("psyanal", "psychoanalysis"),
  Psychology => ("psych", "psychology"),
  Railway => ("rail", "railway"),
  RomanMythology => ("rommyth", "Roman mythology"),
  Shinto => ("Shinto", "Shinto"),
  Shogi => ("shogi", "shogi"),
  Skiing => ("ski", "skiing"),
  Sports => ("sports", "sports"),
  Statistics => ("stat", "statistics"),
  StockMarket => ("stockm", "stock market"),
  Sumo => ("sumo", "sumo"),
  Surgery => ("surg", "surgery"),
  Telecommunications => ("telec", "telecommunications"),
  Trademark => ("tradem", "trademark"),
  Television => ("tv", "television"),
  Veterinary => ("vet", "veterinary terms"),
  VideoGames => ("vidg", "video games"),
  Zoology => ("zool", "zoology"),
}

controlled_vocabulary! {
  /// Usage, register and name-class flags of a sense.
  MiscTag: TagCategory::Misc;
  Abbreviation => ("abbr", "abbreviation"),
  Archaic => ("arch", "archaic"),
  Character => ("char", "character"),
  ChildrensLanguage => ("chn", "children's language"),
  Colloquial => ("col", "colloquial"),
  Company => ("company", "company name"),
  Creature => ("creat", "creature"),
  Dated => ("dated", "dated term"),
  Deity => ("dei", "deity"),
  Derogatory => ("derog", "derogatory"),
  Document => ("doc", "document"),
  Euphemistic => ("euph", "euphemistic"),
  Event => ("ev", "event"),
  Familiar => ("fam", "familiar language"),
  Female => ("fem", "female term or language"),
  Fiction => ("fict", "fiction"),
  Formal => ("form", "formal or literary term"),
  GivenName => ("given", "given name or forename, gender not specified"),
  Group => ("group", "group"),
  Historical => ("hist", "historical term"),
  Honorific => ("hon", "honorific or respectful (sonkeigo) language"),
  Humble => ("hum", "humble (kenjougo) language"),
  Idiomatic => ("id", "idiomatic expression"),
  Jocular => ("joc", "jocular, humorous term"),
  Legend => ("leg", "legend"),
  MangaSlang => ("m-sl", "manga slang"),
  Male => ("male", "male term or language"),
  Mythology => ("myth", "mythology"),
  InternetSlang => ("net-sl", "Internet slang"),
  Object => ("obj", "object"),
  Obsolete => ("obs", "obsolete term"),
  Onomatopoeic => ("on-mim", "onomatopoeic or mimetic word"),
  Organization => ("organization", "organization name"),
  Other => ("oth", "other"),
  FullName => ("person", "full name of a particular person"),
  PlaceName => ("place", "place name"),
  Poetical => ("poet", "poetical term"),
  Polite => ("pol", "polite (teineigo) language"),
  Product => ("product", "product name"),
  Proverb => ("proverb", "proverb"),
  Quotation => ("quote", "quotation"),
  Rare => ("rare", "rare term"),
  Religion => ("relig", "religion"),
  Sensitive => ("sens", "sensitive"),
  Service => ("serv", "service"),
  Ship => ("ship", "ship name"),
  Slang => ("sl", "slang"),
  Station => ("station", "railway station"),
  Surname => ("surname", "family or surname"),
  UsuallyKana => ("uk", "word usually written using kana alone"),
  Unclassified => ("unclass", "unclassified name"),
  Vulgar => ("vulg", "vulgar expression or word"),
  Work => ("work", "work of art, literature, music, etc. name"),
  Rude => ("X", "rude or X-rated term (not displayed in educational software)"),
  Yojijukugo => ("yoji", "yojijukugo"),
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────
