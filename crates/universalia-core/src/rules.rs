//! Static rule catalog shown alongside the translator.

use crate::types::RuleDescriptor;

pub const UNIVERSALIA_RULES: &[RuleDescriptor] = &[
    RuleDescriptor {
        category: "音韵学 (Phonology)",
        title: "音形一致 (Phonemic Orthography)",
        description: "严格的一字一音。5个元音 (a, e, i, o, u)，12个辅音。所见即所读。",
        example: "'Universalia' -> /u.ni.ver.sa.li.a/",
    },
    RuleDescriptor {
        category: "音韵学 (Phonology)",
        title: "重音规则 (Stress Rule)",
        description: "重音永远落在倒数第二个音节上。",
        example: "Universalia -> [u.ni.ver.sa.'li.a]",
    },
    RuleDescriptor {
        category: "词法学 (Morphology)",
        title: "固定派生 (Fixed Derivation)",
        description: "词根不变。后缀决定词性：-o (名词), -a (形容词), -e (副词), -i (动词原形)。",
        example: "Rapid (快/根) -> Rapida (快的), Rapide (快地)",
    },
    RuleDescriptor {
        category: "句法学 (Syntax)",
        title: "SVO 语序",
        description: "严格的主语-谓语-宾语结构。",
        example: "Mi amas vin (我爱你)",
    },
    RuleDescriptor {
        category: "动词 (Verbs)",
        title: "时态标记 (Tense Markers)",
        description: "使用助词标记时间：'te' (过去/了), 'fu' (将来/会)。后缀 '-en' 表示进行时 (正在)。",
        example: "Mi te manjen (我当时正在吃)",
    },
];
