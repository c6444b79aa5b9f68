//! Static HTML report rendering. `render_report` is a pure function of the
//! snapshot, the archive listing, and the static link tables: identical
//! inputs produce byte-identical HTML.

use hubcore::classify::OTHER_CATEGORY;
use hubcore::{abbreviate_count, Snapshot, UNKNOWN_AUTHOR};

pub const HUB_BASE_URL: &str = "https://huggingface.co";

/// Category → hub pipeline tag used for browse links. Static lookup data
/// passed into rendering; categories without an entry link nowhere.
pub struct TagLinks {
    entries: Vec<(&'static str, &'static str)>,
}

impl Default for TagLinks {
    fn default() -> Self {
        Self {
            entries: vec![
                ("Language Models", "text-generation"),
                ("Multimodal", "multimodal"),
                ("Image Generation", "text-to-image"),
                ("Video Generation", "text-to-video"),
                ("Speech Synthesis", "text-to-speech"),
                ("Speech Recognition", "automatic-speech-recognition"),
                ("Document Understanding", "document-question-answering"),
                ("Embeddings", "feature-extraction"),
                ("Image Understanding", "image-classification"),
            ],
        }
    }
}

impl TagLinks {
    pub fn category_url(&self, category: &str) -> Option<String> {
        self.entries
            .iter()
            .find(|(name, _)| *name == category)
            .map(|(_, tag)| format!("{HUB_BASE_URL}/models?pipeline_tag={tag}"))
    }

    pub fn keyword_url(&self, keyword: &str) -> String {
        format!("{HUB_BASE_URL}/models?search={}", escape(keyword))
    }

    pub fn model_url(&self, id: &str) -> String {
        format!("{HUB_BASE_URL}/{}", escape(id))
    }

    pub fn author_url(&self, author: &str) -> String {
        format!("{HUB_BASE_URL}/{}", escape(author))
    }
}

/// Badge colors per category, table-side counterpart of the chart palette.
const CATEGORY_BADGE_COLORS: &[(&str, &str)] = &[
    ("Language Models", "#6366f1"),
    ("Multimodal", "#14b8a6"),
    ("Image Generation", "#3b82f6"),
    ("Video Generation", "#22c55e"),
    ("Speech Synthesis", "#f59e0b"),
    ("Speech Recognition", "#a855f7"),
    ("Document Understanding", "#0ea5e9"),
    ("Embeddings", "#d97706"),
    ("Image Understanding", "#8b5cf6"),
];

const DEFAULT_BADGE_COLOR: &str = "#6b7280";

fn badge_color(category: &str) -> &'static str {
    CATEGORY_BADGE_COLORS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_BADGE_COLOR)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn rank_icon(rank: usize) -> String {
    match rank {
        1 => "🥇".to_string(),
        2 => "🥈".to_string(),
        3 => "🥉".to_string(),
        other => other.to_string(),
    }
}

fn table_rows(snapshot: &Snapshot, links: &TagLinks, top_n: usize) -> String {
    let mut rows = String::new();
    for (i, model) in snapshot.trending_models.iter().take(top_n).enumerate() {
        let category = model.tech_category.as_deref().unwrap_or(OTHER_CATEGORY);
        let category_cell = match links.category_url(category) {
            Some(url) => format!(
                r#"<a href="{url}" target="_blank"><span class="category-tag" style="background-color: {color}">{name}</span></a>"#,
                url = url,
                color = badge_color(category),
                name = escape(category),
            ),
            None => format!(
                r#"<span class="category-tag" style="background-color: {color}">{name}</span>"#,
                color = badge_color(category),
                name = escape(category),
            ),
        };
        let author = model.resolved_author();
        let author_cell = if author == UNKNOWN_AUTHOR {
            escape(author)
        } else {
            format!(
                r#"<a href="{url}" target="_blank">{name}</a>"#,
                url = links.author_url(author),
                name = escape(author),
            )
        };
        rows.push_str(&format!(
            r#"                <tr class="model-row">
                    <td class="rank">{rank}</td>
                    <td class="model-name"><a href="{model_url}" target="_blank">{name}</a></td>
                    <td>{category_cell}</td>
                    <td class="downloads">{downloads}</td>
                    <td class="likes">{likes}</td>
                    <td class="author">{author_cell}</td>
                </tr>
"#,
            rank = rank_icon(i + 1),
            model_url = links.model_url(&model.id),
            name = escape(model.name()),
            category_cell = category_cell,
            downloads = abbreviate_count(model.downloads),
            likes = model.likes,
            author_cell = author_cell,
        ));
    }
    rows
}

/// Keyword cloud with four heat tiers scaled against the hottest keyword.
fn keyword_cloud(snapshot: &Snapshot, links: &TagLinks) -> String {
    let keywords = &snapshot.statistics.tech_keywords;
    if keywords.is_empty() {
        return r#"<p class="placeholder">No keyword data available yet.</p>"#.to_string();
    }
    let max = keywords.iter().map(|k| k.count).max().unwrap_or(1).max(1) as f64;
    let mut cloud = String::new();
    for keyword in keywords.iter().take(30) {
        let heat = keyword.count as f64 / max;
        let class = if heat >= 0.7 {
            "kw-hot"
        } else if heat >= 0.4 {
            "kw-warm"
        } else if heat >= 0.2 {
            "kw-medium"
        } else {
            "kw-normal"
        };
        cloud.push_str(&format!(
            r#"<a href="{url}" target="_blank" class="{class}">{name}</a>
"#,
            url = links.keyword_url(&keyword.keyword),
            class = class,
            name = escape(&keyword.keyword),
        ));
    }
    cloud
}

fn archive_list(archive_dates: &[String]) -> String {
    if archive_dates.is_empty() {
        return r#"<li class="placeholder">No archived snapshots yet.</li>"#.to_string();
    }
    let mut items = String::new();
    for date in archive_dates {
        items.push_str(&format!(
            r#"<li><a href="hf_data_{date}.json">{date}</a></li>
"#,
            date = escape(date),
        ));
    }
    items
}

/// Render the full report document. Pure: no clock, no filesystem; the only
/// dates shown come from the snapshot and the archive listing.
pub fn render_report(
    snapshot: &Snapshot,
    archive_dates: &[String],
    links: &TagLinks,
    top_n: usize,
) -> String {
    let trending_count = snapshot.trending_models.len();
    let category_count = snapshot.statistics.tech_distribution.len();
    let total_samples = snapshot.trending_models.len()
        + snapshot.most_downloaded.len()
        + snapshot.most_liked.len();
    let category_total: u64 = snapshot.statistics.tech_distribution.values().sum();
    let llm_percent = if category_total > 0 {
        let llm = snapshot
            .statistics
            .tech_distribution
            .get("Language Models")
            .copied()
            .unwrap_or(0);
        (llm as f64 / category_total as f64 * 100.0).round() as u64
    } else {
        0
    };
    let date = escape(&snapshot.date);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Model Hub Daily - Trending AI Models</title>
    <style>
        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            min-height: 100vh;
            padding: 20px;
        }}
        .container {{ max-width: 1200px; margin: 0 auto; }}
        .header {{ text-align: center; color: white; padding: 40px 20px; }}
        .header h1 {{ font-size: 2.5rem; margin-bottom: 10px; }}
        .date-badge {{
            display: inline-block;
            background: rgba(255,255,255,0.2);
            padding: 8px 20px;
            border-radius: 20px;
            margin-top: 15px;
            font-size: 0.9rem;
        }}
        .stats-grid {{
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
            gap: 20px;
            margin: 30px 0;
        }}
        .stat-card {{
            background: white;
            border-radius: 16px;
            padding: 25px;
            text-align: center;
            box-shadow: 0 10px 40px rgba(0,0,0,0.1);
        }}
        .stat-card .number {{ font-size: 2.5rem; font-weight: bold; color: #667eea; }}
        .stat-card .label {{ color: #666; margin-top: 5px; }}
        .card {{
            background: white;
            border-radius: 16px;
            padding: 30px;
            margin: 20px 0;
            box-shadow: 0 10px 40px rgba(0,0,0,0.1);
        }}
        .card h2 {{ color: #333; margin-bottom: 20px; font-size: 1.5rem; }}
        table {{ width: 100%; border-collapse: collapse; }}
        th, td {{ padding: 15px 10px; text-align: left; border-bottom: 1px solid #eee; }}
        th {{ background: #f8f9fa; font-weight: 600; color: #555; }}
        td a {{ text-decoration: none; color: #333; font-weight: 600; }}
        .rank {{ font-size: 1.2rem; width: 60px; }}
        .category-tag {{
            display: inline-block;
            padding: 4px 12px;
            border-radius: 12px;
            color: white;
            font-size: 0.85rem;
        }}
        .downloads {{ color: #667eea; font-weight: 600; }}
        .likes {{ color: #e91e63; }}
        .author a {{ color: #888; font-weight: 400; font-size: 0.9rem; }}
        .keyword-cloud {{
            display: flex;
            flex-wrap: wrap;
            justify-content: center;
            align-items: center;
            gap: 8px 12px;
            background: #fafbff;
            border-radius: 16px;
            padding: 30px 20px;
            min-height: 120px;
        }}
        .keyword-cloud a {{
            text-decoration: none;
            font-weight: 600;
            padding: 6px 14px;
            border-radius: 10px;
            display: inline-block;
        }}
        .kw-hot {{ background: #667eea; color: white; font-size: 1.5rem; }}
        .kw-warm {{ background: #f5576c; color: white; font-size: 1.25rem; }}
        .kw-medium {{ background: #4facfe; color: white; font-size: 1.1rem; }}
        .kw-normal {{ background: rgba(102,126,234,0.12); color: #667eea; font-size: 0.95rem; }}
        .placeholder {{ color: #999; text-align: center; padding: 10px 0; }}
        .image-grid {{
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(400px, 1fr));
            gap: 20px;
            margin: 20px 0;
        }}
        .image-card {{
            background: white;
            border-radius: 16px;
            padding: 20px;
            box-shadow: 0 10px 40px rgba(0,0,0,0.1);
        }}
        .image-card h3 {{ color: #333; margin-bottom: 15px; font-size: 1.2rem; }}
        .image-card img, .card img {{ width: 100%; border-radius: 8px; cursor: pointer; }}
        .archive ul {{ list-style: none; padding: 0; }}
        .archive li {{ padding: 8px 0; border-bottom: 1px solid #eee; }}
        .archive a {{ color: #667eea; text-decoration: none; }}
        .footer {{ text-align: center; color: white; padding: 30px; opacity: 0.9; }}
        .modal {{
            display: none;
            position: fixed;
            z-index: 1000;
            inset: 0;
            background-color: rgba(0,0,0,0.9);
            cursor: pointer;
        }}
        .modal img {{
            max-width: 90%;
            max-height: 90%;
            position: absolute;
            top: 50%;
            left: 50%;
            transform: translate(-50%, -50%);
            border-radius: 8px;
        }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>🔥 Model Hub Daily</h1>
            <p>Trending AI model report</p>
            <div class="date-badge">📅 {date} | data source: model hub</div>
        </div>

        <div class="stats-grid">
            <div class="stat-card">
                <div class="number">{trending_count}</div>
                <div class="label">Trending models</div>
            </div>
            <div class="stat-card">
                <div class="number">{category_count}</div>
                <div class="label">Technology categories</div>
            </div>
            <div class="stat-card">
                <div class="number">{total_samples}+</div>
                <div class="label">Analyzed samples</div>
            </div>
            <div class="stat-card">
                <div class="number">{llm_percent}%</div>
                <div class="label">Language model share</div>
            </div>
        </div>

        <div class="card">
            <h2>📈 Today's Top {top_n}</h2>
            <table>
                <thead>
                    <tr>
                        <th>Rank</th>
                        <th>Model</th>
                        <th>Category</th>
                        <th>Downloads</th>
                        <th>Likes</th>
                        <th>Author</th>
                    </tr>
                </thead>
                <tbody>
{table_rows}                </tbody>
            </table>
        </div>

        <div class="card">
            <h2>🎨 Tech Keyword Cloud</h2>
            <p class="placeholder">Keywords extracted from trending model names and tags; bigger means hotter. Click to browse the hub.</p>
            <div class="keyword-cloud">
{keyword_cloud}            </div>
        </div>

        <div class="image-grid">
            <div class="image-card">
                <h3>📊 Top Models Leaderboard</h3>
                <img src="leaderboard_{date}.png" alt="Leaderboard" class="zoomable" onerror="this.parentElement.style.display='none'">
            </div>
            <div class="image-card">
                <h3>📈 Category Distribution</h3>
                <img src="tech_distribution_{date}.png" alt="Category distribution" class="zoomable" onerror="this.parentElement.style.display='none'">
            </div>
        </div>
        <div class="image-grid">
            <div class="image-card">
                <h3>🔵 Model Popularity</h3>
                <img src="bubble_chart_{date}.png" alt="Popularity bubble chart" class="zoomable" onerror="this.parentElement.style.display='none'">
            </div>
            <div class="image-card">
                <h3>🏙 Active Organizations</h3>
                <img src="org_ranking_{date}.png" alt="Organization ranking" class="zoomable" onerror="this.parentElement.style.display='none'">
            </div>
        </div>
        <div class="card">
            <h2>☁️ Keyword Cloud Image</h2>
            <img src="wordcloud_{date}.png" alt="Word cloud" class="zoomable" onerror="this.parentElement.style.display='none'">
        </div>
        <div class="card">
            <h2>📉 Category Trends</h2>
            <img src="trend_chart_{date}.png" alt="Category trends" class="zoomable" onerror="this.parentElement.style.display='none'">
        </div>

        <div class="card archive">
            <h2>📂 Snapshot Archive</h2>
            <p>The last seven collection runs.</p>
            <ul>
{archive_list}            </ul>
        </div>

        <div class="footer">
            <p>Generated by the model hub trend pipeline.</p>
        </div>
    </div>

    <div id="imageModal" class="modal" onclick="this.style.display='none'">
        <img id="modalImage" alt="">
    </div>
    <script>
        document.querySelectorAll('.zoomable').forEach(function(img) {{
            img.addEventListener('click', function() {{
                var modal = document.getElementById('imageModal');
                document.getElementById('modalImage').src = this.src;
                modal.style.display = 'block';
            }});
        }});
        document.addEventListener('keydown', function(e) {{
            if (e.key === 'Escape') {{
                document.getElementById('imageModal').style.display = 'none';
            }}
        }});
    </script>
</body>
</html>
"#,
        date = date,
        trending_count = trending_count,
        category_count = category_count,
        total_samples = total_samples,
        llm_percent = llm_percent,
        top_n = top_n,
        table_rows = table_rows(snapshot, links, top_n),
        keyword_cloud = keyword_cloud(snapshot, links),
        archive_list = archive_list(archive_dates),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(escape("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&#39;");
    }

    #[test]
    fn rank_icons_cover_the_podium() {
        assert_eq!(rank_icon(1), "🥇");
        assert_eq!(rank_icon(3), "🥉");
        assert_eq!(rank_icon(4), "4");
    }

    #[test]
    fn unmapped_categories_get_the_default_badge_color() {
        assert_eq!(badge_color("Language Models"), "#6366f1");
        assert_eq!(badge_color("Other"), DEFAULT_BADGE_COLOR);
    }

    #[test]
    fn category_links_come_from_the_tag_table() {
        let links = TagLinks::default();
        assert_eq!(
            links.category_url("Language Models").as_deref(),
            Some("https://huggingface.co/models?pipeline_tag=text-generation")
        );
        assert!(links.category_url("Other").is_none());
    }
}
