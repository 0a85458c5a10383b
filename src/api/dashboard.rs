// Static HTML dashboard served at `/`

pub const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Douban Movies</title>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <style>
        body { font-family: Arial, sans-serif; margin: 20px; background: #f5f5f5; }
        h1 { text-align: center; color: #333; }
        .plot { background: white; padding: 20px; margin: 20px auto;
                border-radius: 8px; max-width: 1400px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
        img { width: 100%; height: auto; border-radius: 4px; }
        .error { color: red; padding: 10px; background: #fee; border-radius: 4px; }
    </style>
</head>
<body>
    <h1>&#127916; Douban Top 100 Movies Analysis</h1>
    <div class="plot">
        <h2>1. Average Rating by Genre</h2>
        <img src="/plots/avg_rating_by_genre.png" alt="Average rating by genre" onerror="this.parentElement.innerHTML='<p class=error>Plot failed to load</p>'">
    </div>
    <div class="plot">
        <h2>2. Number of Movies per Genre</h2>
        <img src="/plots/movie_count_by_genre.png" alt="Number of movies per genre" onerror="this.parentElement.innerHTML='<p class=error>Plot failed to load</p>'">
    </div>
    <div class="plot">
        <h2>3. Rating Distribution by Genre</h2>
        <img src="/plots/rating_distribution_by_genre.png" alt="Rating distribution by genre" onerror="this.parentElement.innerHTML='<p class=error>Plot failed to load</p>'">
    </div>
    <div class="plot">
        <h2>4. Average Rating: Genre &times; Region Heatmap</h2>
        <img src="/plots/heatmap_avg_rating.png" alt="Average rating by genre and region" onerror="this.parentElement.innerHTML='<p class=error>Plot failed to load</p>'">
    </div>
</body>
</html>
"#;
