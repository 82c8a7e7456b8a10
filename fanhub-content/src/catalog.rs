//! Canned content for the simulated provider.
//!
//! Static tables per esport. Builders take the clock reading and a random
//! source so the provider decides where those come from.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use fanhub_core::types::{
    Achievement, Coach, Engagement, Esport, Match, MatchFormat, NewsItem, Opponent, Platform,
    Player, StatValue, Team, TeamStat, Trend, Video,
};

const ORG_NAME: &str = "FURIA Esports";
const ORG_LOGO: &str = "https://upload.wikimedia.org/wikipedia/pt/f/f9/Furia_Esports_logo.png";
const NEWS_SOURCE: &str = "FURIA News";
const VIDEO_CHANNEL: &str = "FURIA TV";

const LOREM_SHORT: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. \
    Nullam in dui mauris. Vivamus hendrerit arcu sed erat molestie vehicula.";
const LOREM_LONG: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. \
    Nullam in dui mauris. Vivamus hendrerit arcu sed erat molestie vehicula. \
    Sed auctor neque eu tellus rhoncus ut eleifend nibh porttitor. Ut in nulla enim. \
    Phasellus molestie magna non est bibendum non venenatis nisl tempor. \
    Suspendisse dictum feugiat nisl ut dapibus. Mauris iaculis porttitor posuere. \
    Praesent id metus massa, ut blandit odio.";

// ═══════════════════════════════════════════════════════════════════════════════
// NEWS
// ═══════════════════════════════════════════════════════════════════════════════

fn news_titles(esport: Esport) -> &'static [&'static str] {
    match esport {
        Esport::Csgo => &[
            "FURIA wins the championship and qualifies for the Major",
            "FURIA player voted best in the world",
            "FURIA announces line-up changes",
            "FURIA beats European side and advances",
            "Tactical breakdown: how FURIA dominated the last event",
            "FURIA breaks a record in an epic match",
            "Exclusive interview with the FURIA captain",
            "FURIA heads to a bootcamp in Europe",
        ],
        Esport::Valorant => &[
            "FURIA announces women's Valorant line-up",
            "FURIA wins regional Valorant tournament",
            "FURIA player stands out at VCT",
            "FURIA qualifies for international Valorant event",
            "Analysis: FURIA's rise in Valorant",
            "FURIA signs international player for Valorant roster",
            "Interview with the FURIA coach on Valorant strategy",
            "FURIA announces exclusive partnership for Valorant division",
        ],
        Esport::Lol => &[
            "FURIA wins the Brazilian derby at CBLOL",
            "FURIA announces roster changes for the next split",
            "FURIA support named MVP of the week",
            "FURIA qualifies for CBLOL playoffs",
            "Analysis: FURIA's aggressive style at CBLOL",
            "FURIA signs Korean player",
            "Exclusive interview with the FURIA mid laner",
            "FURIA unveils new gaming house for the LoL team",
        ],
    }
}

/// Up to `count` news items dated within the last week.
pub(crate) fn news<R: Rng + ?Sized>(
    esport: Esport,
    count: usize,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<NewsItem> {
    news_titles(esport)
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, title)| NewsItem {
            id: format!("news-{}-{}", now.timestamp_millis(), i),
            title: (*title).to_string(),
            excerpt: LOREM_SHORT.to_string(),
            content: LOREM_LONG.to_string(),
            image_url: format!("assets/images/news-{}-{}.jpg", esport, i % 3 + 1),
            category: esport.label().to_string(),
            source: NEWS_SOURCE.to_string(),
            date: now - Duration::days(rng.gen_range(0..7)),
            url: "#".to_string(),
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// TEAM
// ═══════════════════════════════════════════════════════════════════════════════

type PlayerRow = (&'static str, &'static str, &'static str, &'static str, &'static str, [(&'static str, f64); 3]);

fn roster(esport: Esport) -> &'static [PlayerRow] {
    match esport {
        Esport::Csgo => &[
            ("Gabriel Toledo", "FalleN", "AWPer", "Brazil", "https://static.cdnlive.com.br/uploads/602/etc/16883982877481.png", [("rating", 1.15), ("kd", 1.24), ("hs", 48.2)]),
            ("Andrei Piovezan", "arT", "Rifler", "Brazil", "https://liquipedia.net/commons/images/8/8f/ArT_at_BLAST_Premier_Fall_Final_2023.jpg", [("rating", 1.08), ("kd", 1.05), ("hs", 52.6)]),
            ("Kaike Cerato", "KSCERATO", "Rifler", "Brazil", "https://liquipedia.net/commons/images/b/b9/KSCERATO_at_BLAST_Premier_Fall_Final_2023.jpg", [("rating", 1.21), ("kd", 1.32), ("hs", 55.1)]),
            ("André Abreu", "drop", "Support", "Brazil", "https://liquipedia.net/commons/images/a/a7/Drop_at_IEM_Rio_2022.jpg", [("rating", 1.07), ("kd", 1.01), ("hs", 49.8)]),
            ("Rafael Costa", "saffee", "AWPer", "Brazil", "https://liquipedia.net/commons/images/d/dd/Saffee_at_IEM_Rio_2022.jpg", [("rating", 1.12), ("kd", 1.18), ("hs", 38.5)]),
        ],
        Esport::Valorant => &[
            ("Marina Ferreira", "mari", "Duelist", "Brazil", "https://liquipedia.net/commons/images/4/4a/Mari_at_VCT_2023_GC_Championship.jpg", [("acs", 245.0), ("kd", 1.35), ("hs", 28.5)]),
            ("Douglas Silva", "dgzin", "Initiator", "Brazil", "https://liquipedia.net/commons/images/e/e7/Dgzin_at_VCT_2023_Americas_League.jpg", [("acs", 210.0), ("kd", 1.12), ("hs", 24.8)]),
            ("Gabriel Santos", "qck", "Controller", "Brazil", "https://liquipedia.net/commons/images/2/2d/Quick_at_VCT_2023_Americas_League.jpg", [("acs", 198.0), ("kd", 0.98), ("hs", 22.3)]),
            ("Agustin Pereira", "Nozwerr", "Sentinel", "Argentina", "https://liquipedia.net/commons/images/8/83/Nozwerr_at_VCT_2024_Americas_Kickoff.jpg", [("acs", 187.0), ("kd", 0.95), ("hs", 21.5)]),
            ("Matheus Lima", "mazin", "Duelist", "Brazil", "https://liquipedia.net/commons/images/d/d9/Mazin_at_VCT_2023_Americas_League.jpg", [("acs", 232.0), ("kd", 1.21), ("hs", 26.9)]),
        ],
        Esport::Lol => &[
            ("Bruno Farias", "Ruler", "Top", "Brazil", "https://liquipedia.net/commons/images/8/86/FURIA_Ruler_2023_Split_1.png", [("kda", 3.4), ("cs", 8.7), ("vision", 0.65)]),
            ("Lee Min-ho", "Jony", "Jungle", "South Korea", "https://liquipedia.net/commons/images/f/f5/FURIA_Jony_2023_Split_1.png", [("kda", 4.2), ("cs", 6.3), ("vision", 0.92)]),
            ("Pedro Augusto", "Krasty", "Mid", "Brazil", "https://liquipedia.net/commons/images/7/7a/FURIA_Krasty_2023_Split_1.png", [("kda", 3.8), ("cs", 9.1), ("vision", 0.73)]),
            ("Matheus Amorim", "Trigo", "ADC", "Brazil", "https://liquipedia.net/commons/images/9/96/FURIA_Trigo_2023_Split_1.png", [("kda", 5.1), ("cs", 9.8), ("vision", 0.61)]),
            ("Felipe Boal", "Boal", "Support", "Brazil", "https://liquipedia.net/commons/images/0/06/FURIA_Boal_2023_Split_1.png", [("kda", 4.5), ("cs", 1.2), ("vision", 2.34)]),
        ],
    }
}

fn coach(esport: Esport) -> Coach {
    let (name, nickname) = match esport {
        Esport::Csgo => ("Nicholas Nogueira", "guerri"),
        Esport::Valorant => ("Matheus Tarasconi", "Matts"),
        Esport::Lol => ("André Guilhoto", "Guilhoto"),
    };
    Coach {
        name: name.to_string(),
        nickname: nickname.to_string(),
    }
}

/// The full roster for an esport.
pub(crate) fn team(esport: Esport) -> Team {
    let players = roster(esport)
        .iter()
        .zip(1u32..)
        .map(|((name, nickname, role, country, image_url, stats), id)| Player {
            id,
            name: (*name).to_string(),
            nickname: (*nickname).to_string(),
            role: (*role).to_string(),
            country: (*country).to_string(),
            image_url: (*image_url).to_string(),
            stats: stats
                .iter()
                .map(|(k, v)| ((*k).to_string(), *v))
                .collect::<BTreeMap<_, _>>(),
        })
        .collect();

    Team {
        name: ORG_NAME.to_string(),
        logo_url: ORG_LOGO.to_string(),
        esport,
        players,
        coach: coach(esport),
        achievements: vec![
            Achievement { title: "Regional Champion".into(), year: "2023".into() },
            Achievement { title: "World Top 3".into(), year: "2022".into() },
            Achievement { title: "National Champion".into(), year: "2021".into() },
        ],
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCHEDULE
// ═══════════════════════════════════════════════════════════════════════════════

fn opponents(esport: Esport) -> &'static [&'static str] {
    match esport {
        Esport::Csgo => &["Liquid", "NAVI", "G2", "FaZe", "Vitality", "Astralis", "NIP", "MIBR", "paiN Gaming"],
        Esport::Valorant => &["Sentinels", "LOUD", "NRG", "DRX", "Paper Rex", "KRÜ", "Leviatán", "Team Liquid", "Cloud9"],
        Esport::Lol => &["paiN Gaming", "LOUD", "RED Canids", "Flamengo Esports", "INTZ", "Keyd Stars", "KaBuM", "Vivo Keyd", "Liberty"],
    }
}

fn tournaments(esport: Esport) -> &'static [&'static str] {
    match esport {
        Esport::Csgo => &["ESL Pro League", "BLAST Premier", "IEM Katowice", "Major Championship", "BLAST Fall Finals"],
        Esport::Valorant => &["VCT Americas", "VCT Champions", "VCT LOCK//IN", "VCT Game Changers", "Masters Tokyo"],
        Esport::Lol => &["CBLOL Split 1", "CBLOL Split 2", "MSI", "Worlds", "CBLOL Academy"],
    }
}

/// Exactly `count` matches, one every two days starting the day after tomorrow.
pub(crate) fn schedule<R: Rng + ?Sized>(
    esport: Esport,
    count: usize,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<Match> {
    let opponents = opponents(esport);
    let tournaments = tournaments(esport);

    (0..count)
        .map(|i| {
            let opponent = opponents.choose(rng).copied().unwrap_or("TBD");
            let tournament = tournaments.choose(rng).copied().unwrap_or("TBD");
            Match {
                id: format!("match-{}-{}", now.timestamp_millis(), i),
                tournament: tournament.to_string(),
                opponent: Opponent {
                    name: opponent.to_string(),
                    logo_url: format!(
                        "assets/images/logo-{}.png",
                        opponent.to_lowercase().replace(' ', "-")
                    ),
                },
                date: now + Duration::days((i as i64 + 1) * 2),
                format: if rng.gen_bool(0.5) { MatchFormat::Bo3 } else { MatchFormat::Bo5 },
                link: "#".to_string(),
            }
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// STATS
// ═══════════════════════════════════════════════════════════════════════════════

/// Season statistics for an esport.
pub(crate) fn stats(esport: Esport) -> Vec<TeamStat> {
    use StatValue::{Number, Text};

    let rows: [(&str, StatValue, u8); 4] = match esport {
        Esport::Csgo => [
            ("Wins", Number(68.0), 68),
            ("Best map", Text("Mirage".into()), 85),
            ("Average rating", Number(1.12), 75),
            ("Headshot %", Text("52.4%".into()), 65),
        ],
        Esport::Valorant => [
            ("Wins", Number(72.0), 72),
            ("Best map", Text("Ascent".into()), 80),
            ("Average ACS", Number(245.0), 78),
            ("First kills", Text("65%".into()), 70),
        ],
        Esport::Lol => [
            ("Wins", Number(65.0), 65),
            ("Average KDA", Number(3.8), 72),
            ("Objectives", Text("74%".into()), 74),
            ("Early game", Text("82%".into()), 82),
        ],
    };

    rows.into_iter()
        .map(|(label, value, percentage)| TeamStat {
            label: label.to_string(),
            value,
            percentage,
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// TRENDS
// ═══════════════════════════════════════════════════════════════════════════════

fn trend_contents(esport: Esport) -> &'static [&'static str] {
    match esport {
        Esport::Csgo => &[
            "FURIA completes a thrilling comeback! #DIADEFURIA",
            "FURIA's level this season is impressive",
            "KSCERATO named player of the match! #MVP",
            "FURIA faces Liquid next, who takes it?",
            "Brazil in the final! FURIA reaches the top again #GGWP",
            "FURIA's Mirage strategy is on another level",
            "FalleN proves he is still Brazil's best AWPer! #GODFalleN",
            "guerri's work as FURIA coach is paying off",
            "Incredible 4k from drop! Watch the highlight #CSGO",
            "saffee delivers a flawless performance for FURIA today #GOFURIA",
            "Fans pack the arena to watch FURIA in Brazil #CrowdLove",
            "FURIA qualifies for the next Major! #RoadToMajor",
        ],
        Esport::Valorant => &[
            "FURIA women dominate the national Valorant scene #GirlPower",
            "Sensational clutch from mari! Watch the highlight #VALORANT",
            "FURIA announces new signing for the Valorant team",
            "dgzin shows his full potential on Jett #Ace",
            "FURIA in the VCT final! Watch with us",
            "Who is FURIA's best duelist? Vote in the poll",
            "Nozwerr with an impressive Cypher performance #SentinelGod",
            "FURIA's rise in the Valorant scene is incredible",
            "FURIA representing Brazil internationally #BRValor",
            "qck with the best smokes of the tournament #ControllerDiff",
            "FURIA announces Korea bootcamp for the Valorant team",
            "Unbelievable ace from mazin! Check out the clip #VALORANT",
        ],
        Esport::Lol => &[
            "FURIA dominates early game and wins at CBLOL #GoFURIA",
            "Krasty is MVP of the week! Impressive performance",
            "Baron steal! FURIA turns the game around",
            "Perfect mid gank from Jony! Watch the replay #JGDiff",
            "FURIA keeps getting stronger this CBLOL split",
            "Trigo picked for team of the week with his Jinx #ADCGap",
            "Impressive map vision from Boal! #SupportDiff",
            "FURIA vs LOUD: the CBLOL classic is today",
            "Ruler dominates top lane with Aatrox! #TopGap",
            "FURIA announces coaching staff changes for LoL",
            "FURIA's draft was perfect! Congrats to the coach",
            "FURIA remains unbeaten at CBLOL after a convincing win",
        ],
    }
}

/// Up to `count` trending posts from the last twelve hours.
pub(crate) fn trends<R: Rng + ?Sized>(
    esport: Esport,
    count: usize,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<Trend> {
    trend_contents(esport)
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, content)| Trend {
            id: format!("trend-{}-{}", now.timestamp_millis(), i),
            content: (*content).to_string(),
            platform: Platform::ALL.choose(rng).copied().unwrap_or(Platform::Twitter),
            timestamp: now - Duration::hours(rng.gen_range(0..12)),
            stats: Engagement {
                likes: rng.gen_range(500..2500),
                shares: rng.gen_range(100..600),
                comments: rng.gen_range(50..350),
            },
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// VIDEOS
// ═══════════════════════════════════════════════════════════════════════════════

fn video_titles(esport: Esport) -> &'static [&'static str] {
    match esport {
        Esport::Csgo => &[
            "FURIA vs Liquid - Highlights",
            "KSCERATO Highlight - Impressive plays",
            "FURIA | Road to Major - Episode 1",
            "Interview with FalleN after an epic win",
            "FURIA at bootcamp - Behind the scenes",
            "TOP 10 FURIA plays of the last tournament",
        ],
        Esport::Valorant => &[
            "FURIA vs Sentinels - VCT Highlights",
            "mari 1v4 clutch on Jett",
            "FURIA | Behind the cameras at VCT",
            "How FURIA dominated Ascent - Tactical analysis",
            "Interview with the FURIA women's team",
            "TOP 10 FURIA plays at VCT Americas",
        ],
        Esport::Lol => &[
            "FURIA vs LOUD - Highlights",
            "Krasty pentakill on Akali",
            "FURIA | Inside CBLOL - Episode 1",
            "Tactical analysis: how FURIA beat RED",
            "Interview with Boal after a decisive win",
            "TOP 10 FURIA plays at CBLOL",
        ],
    }
}

/// Up to `count` videos from the last two weeks.
pub(crate) fn videos<R: Rng + ?Sized>(
    esport: Esport,
    count: usize,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<Video> {
    video_titles(esport)
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, title)| Video {
            id: format!("video-{}-{}", now.timestamp_millis(), i),
            title: (*title).to_string(),
            thumbnail_url: format!("assets/images/video-{}-{}.jpg", esport, i % 3 + 1),
            channel_name: VIDEO_CHANNEL.to_string(),
            views: format!("{}K", rng.gen_range(100..600)),
            date: now - Duration::days(rng.gen_range(0..14)),
            link: "#".to_string(),
        })
        .collect()
}
