use crate::server::api;
use crate::server::static_files;

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}

pub fn route_request(method: &str, path: &str, body: &str) -> HttpResponse {
    if let Some(response) = static_files::try_serve_static(method, path) {
        return response;
    }
    match (method, path) {
        ("GET", "/") => HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "text/html; charset=utf-8",
            body: index_html(),
        },
        ("GET", "/api/health") => json_response(api::health_payload()),
        ("GET", "/api/version") => json_response(api::version_payload()),
        ("GET", "/api/roster") => json_response(api::roster_payload()),
        ("GET", "/api/abilities") => json_response(api::abilities_payload()),
        ("GET", "/api/matrix") => json_response(api::matrix_payload()),
        ("POST", "/api/duel") => match api::duel_payload(body) {
            Ok(payload) => HttpResponse {
                status_code: 200,
                status_text: "OK",
                content_type: "application/json",
                body: payload,
            },
            Err(api::DuelError::Parse(err)) => {
                error_response(400, "Bad Request", &format!("Invalid request body: {err}"))
            }
            Err(api::DuelError::Validation(msg)) => error_response(400, "Bad Request", &msg),
        },
        _ => error_response(404, "Not Found", "Route not found"),
    }
}

fn json_response(payload: Result<String, serde_json::Error>) -> HttpResponse {
    match payload {
        Ok(body) => HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "application/json",
            body,
        },
        Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}

fn index_html() -> String {
    r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>Highnoon Duel Calculator</title>
  <style>
    body { font-family: Arial, sans-serif; max-width: 960px; margin: 24px auto; padding: 0 12px; }
    h1 { margin-bottom: 4px; }
    .hint { color: #666; margin-top: 0; }
    .pickers { display: flex; gap: 24px; flex-wrap: wrap; }
    .picker { flex: 1; min-width: 260px; }
    label { display: block; margin: 8px 0 4px; font-weight: 600; }
    select { width: 100%; padding: 4px; }
    .toggles { margin-top: 8px; display: flex; gap: 6px; flex-wrap: wrap; }
    .toggle { padding: 6px 10px; border: 1px solid #bbb; border-radius: 6px; background: #f6f6f6; cursor: pointer; }
    .toggle.active { background: #2a6df4; border-color: #2a6df4; color: #fff; }
    .cards { display: flex; gap: 24px; flex-wrap: wrap; }
    .card { border: 1px solid #ddd; border-radius: 8px; padding: 14px; margin: 14px 0; flex: 1; min-width: 260px; }
    .card h2 { margin: 0 0 8px; font-size: 1.05rem; }
    dl { display: grid; grid-template-columns: auto 1fr; gap: 2px 12px; margin: 0; }
    dt { color: #666; }
    dd { margin: 0; }
    #summary { border: 1px solid #ddd; border-radius: 8px; padding: 18px; text-align: center; }
    .headline { font-size: 2.2rem; font-weight: 700; display: block; }
    .detail { color: #444; display: block; margin-top: 4px; }
    #note { color: #a40; text-align: center; min-height: 1.2em; }
    @keyframes pulse { from { background: #fff3c4; } to { background: transparent; } }
    .flash { animation: pulse 0.6s ease-out; }
  </style>
</head>
<body>
  <h1>Hero Duel Calculator</h1>
  <p class="hint">Pick an attacker and a defender; toggle abilities to see the time to kill change.</p>

  <div class="pickers">
    <div class="picker">
      <label for="attacker-select">Attacker</label>
      <select id="attacker-select" size="5"></select>
      <div id="attacker-abilities" class="toggles"></div>
    </div>
    <div class="picker">
      <label for="defender-select">Defender</label>
      <select id="defender-select" size="5"></select>
      <div id="defender-abilities" class="toggles"></div>
    </div>
  </div>

  <div class="cards">
    <section id="attacker-card" class="card"></section>
    <section id="defender-card" class="card"></section>
  </div>

  <div id="summary">Loading roster…</div>
  <p id="note"></p>

  <script>
    const attackerSelect = document.getElementById('attacker-select');
    const defenderSelect = document.getElementById('defender-select');
    const summary = document.getElementById('summary');
    const note = document.getElementById('note');

    const activeAttacker = new Set();
    const activeDefender = new Set();
    let heroes = [];
    let lastSignature = '';

    async function init() {
      const [rosterResponse, abilitiesResponse] = await Promise.all([
        fetch('/api/roster'),
        fetch('/api/abilities'),
      ]);
      const roster = await rosterResponse.json();
      const abilities = await abilitiesResponse.json();
      heroes = roster.heroes;

      fillSelect(attackerSelect);
      fillSelect(defenderSelect);
      attackerSelect.selectedIndex = 0;
      defenderSelect.selectedIndex = heroes.length > 1 ? 1 : 0;
      buildToggles(document.getElementById('attacker-abilities'), abilities.attacker, activeAttacker);
      buildToggles(document.getElementById('defender-abilities'), abilities.defender, activeDefender);
      attackerSelect.addEventListener('change', update);
      defenderSelect.addEventListener('change', update);
      await update();
    }

    function fillSelect(select) {
      select.innerHTML = '';
      for (const hero of heroes) {
        const option = document.createElement('option');
        option.value = hero.name;
        option.textContent = hero.name + ' (' + hero.role + ')';
        select.appendChild(option);
      }
    }

    function buildToggles(container, abilities, active) {
      container.innerHTML = '';
      for (const ability of abilities) {
        const button = document.createElement('button');
        button.type = 'button';
        button.className = 'toggle';
        const factor = ability.multiplier != null ? ability.multiplier : ability.damage_reduction;
        button.textContent = ability.label + ' ×' + factor;
        button.addEventListener('click', () => {
          if (active.has(ability.id)) {
            active.delete(ability.id);
            button.classList.remove('active');
          } else {
            active.add(ability.id);
            button.classList.add('active');
          }
          update();
        });
        container.appendChild(button);
      }
    }

    function statCard(title, hero) {
      const ammo = hero.ammo == null ? '∞' : hero.ammo;
      return '<h2>' + title + ': ' + hero.name + '</h2>' +
        '<dl>' +
        '<dt>Role</dt><dd>' + hero.role + '</dd>' +
        '<dt>Damage / bullet</dt><dd>' + hero.damage_per_bullet + '</dd>' +
        '<dt>Bullets / shot</dt><dd>' + hero.bullets_per_shot + '</dd>' +
        '<dt>Fire rate</dt><dd>' + hero.fire_rate + ' shots/s</dd>' +
        '<dt>Reload</dt><dd>' + hero.reload_time + ' s</dd>' +
        '<dt>Ammo</dt><dd>' + ammo + '</dd>' +
        '<dt>Armor piercing</dt><dd>' + (hero.armor_piercing ? 'yes' : 'no') + '</dd>' +
        '<dt>HP / Shields / Armor</dt><dd>' + hero.health + ' / ' + hero.shields + ' / ' + hero.armor + '</dd>' +
        '</dl>';
    }

    async function update() {
      const attacker = attackerSelect.value;
      const defender = defenderSelect.value;
      if (!attacker || !defender) return;
      const response = await fetch('/api/duel', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({
          attacker: attacker,
          defender: defender,
          attacker_abilities: Array.from(activeAttacker),
          defender_abilities: Array.from(activeDefender),
        }),
      });
      if (!response.ok) {
        summary.textContent = 'Request failed (HTTP ' + response.status + ')';
        return;
      }
      const duel = await response.json();
      document.getElementById('attacker-card').innerHTML = statCard('Attacker', duel.attacker);
      document.getElementById('defender-card').innerHTML = statCard('Defender', duel.defender);
      renderResult(duel.result);
    }

    function renderResult(result) {
      if (result.outcome === 'unreachable') {
        summary.innerHTML = '<span class="headline">No kill</span>';
        note.textContent = result.note;
      } else {
        const reloadsText = result.reloads === 1 ? '1 reload' : result.reloads + ' reloads';
        summary.innerHTML =
          '<span class="headline">' + result.seconds.toFixed(2) + ' s</span>' +
          '<span class="detail">' + result.bullets + ' bullets, ' + reloadsText + '</span>';
        note.textContent = '';
      }
      const signature = JSON.stringify(result);
      if (lastSignature !== '' && signature !== lastSignature) {
        summary.classList.remove('flash');
        void summary.offsetWidth;
        summary.classList.add('flash');
      }
      lastSignature = signature;
    }

    init().catch((err) => {
      summary.textContent = 'Failed to load roster: ' + err;
    });
  </script>
</body>
</html>
"#
    .to_string()
}
