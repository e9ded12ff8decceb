use chrono::{NaiveDate, NaiveDateTime};

pub fn render_index(today: NaiveDate, countdown_target: NaiveDateTime) -> String {
    INDEX_HTML
        .replace("{{DATE}}", &today.format("%A, %B %-d, %Y").to_string())
        .replace(
            "{{TARGET}}",
            &countdown_target.format("%Y-%m-%dT%H:%M:%S").to_string(),
        )
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Daily Tracker</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #e8eef6;
      --bg-2: #b8cbe0;
      --ink: #1f2a36;
      --accent: #3a7bd5;
      --success: #2d9d5b;
      --warning: #e0952b;
      --danger: #d64545;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(31, 42, 54, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #f3f7fb 60%, #eef2f7 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.3rem;
    }

    .subtitle {
      margin: 6px 0 0;
      color: #5a6472;
    }

    .card {
      background: white;
      border-radius: 20px;
      padding: 20px;
      border: 1px solid rgba(31, 42, 54, 0.08);
    }

    .countdown {
      display: grid;
      grid-template-columns: repeat(4, 1fr);
      gap: 12px;
      text-align: center;
    }

    .countdown .value {
      font-size: 2rem;
      font-weight: 600;
      color: var(--accent);
    }

    .countdown .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #7d8794;
    }

    form.add {
      display: flex;
      gap: 10px;
      margin-bottom: 14px;
    }

    input[type="text"], textarea {
      flex: 1;
      border: 1px solid rgba(31, 42, 54, 0.2);
      border-radius: 14px;
      padding: 12px 14px;
      font: inherit;
    }

    textarea {
      width: 100%;
      min-height: 90px;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    button.ghost {
      background: rgba(31, 42, 54, 0.08);
      color: var(--ink);
    }

    .task {
      display: flex;
      align-items: center;
      gap: 12px;
      padding: 10px 4px;
      border-bottom: 1px solid rgba(31, 42, 54, 0.06);
    }

    .task .check {
      width: 28px;
      height: 28px;
      padding: 0;
      border-radius: 50%;
      background: white;
      border: 2px solid rgba(31, 42, 54, 0.3);
      color: white;
    }

    .task.done .check {
      background: var(--success);
      border-color: var(--success);
    }

    .task.done .text {
      text-decoration: line-through;
      opacity: 0.6;
    }

    .task .text {
      flex: 1;
    }

    .task .remove {
      background: transparent;
      color: var(--danger);
      padding: 4px 8px;
    }

    .empty {
      text-align: center;
      opacity: 0.6;
      padding: 18px 0;
    }

    .bar {
      height: 14px;
      border-radius: 999px;
      background: rgba(31, 42, 54, 0.08);
      overflow: hidden;
    }

    .bar .fill {
      height: 100%;
      width: 0;
      transition: width 300ms ease;
    }

    .fill[data-tier="complete"] { background: var(--success); }
    .fill[data-tier="warning"] { background: var(--warning); }
    .fill[data-tier="danger"], .fill[data-tier="empty"] { background: var(--danger); }

    .quote {
      margin-top: 14px;
      font-style: italic;
      color: #4b5563;
      transition: opacity 0.5s ease-in-out;
    }

    .calendar-nav {
      display: flex;
      align-items: center;
      justify-content: space-between;
      margin-bottom: 10px;
    }

    .calendar {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 6px;
      text-align: center;
    }

    .calendar .weekday {
      font-size: 0.75rem;
      color: #7d8794;
    }

    .calendar .cell {
      position: relative;
      padding: 10px 0;
      border-radius: 10px;
      min-height: 40px;
    }

    .cell.past { opacity: 0.6; }
    .cell.today { outline: 2px solid var(--accent); font-weight: 600; }
    .cell.complete { background: rgba(45, 157, 91, 0.25); }
    .cell.partial { background: rgba(224, 149, 43, 0.25); }

    .cell .badge {
      position: absolute;
      top: -4px;
      right: -2px;
      font-size: 0.7rem;
    }

    .backup {
      display: grid;
      gap: 10px;
    }

    .status {
      font-size: 0.95rem;
      color: #5a6472;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    .hidden {
      display: none;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
    }
  </style>
</head>
<body>
  <main class="app" data-target="{{TARGET}}">
    <header>
      <h1>Daily Tracker</h1>
      <p class="subtitle" id="current-date">{{DATE}}</p>
    </header>

    <section class="card countdown">
      <div><div class="value" id="days">0</div><div class="label">Days</div></div>
      <div><div class="value" id="hours">00</div><div class="label">Hours</div></div>
      <div><div class="value" id="minutes">00</div><div class="label">Minutes</div></div>
      <div><div class="value" id="seconds">00</div><div class="label">Seconds</div></div>
    </section>

    <section class="card">
      <h2>Today's tasks</h2>
      <form class="add" id="add-form">
        <input type="text" id="task-input" placeholder="What needs doing today?" autocomplete="off" />
        <button type="submit">Add</button>
      </form>
      <div id="tasks"></div>
    </section>

    <section class="card">
      <h2>Progress <span id="progress-text">0%</span></h2>
      <div class="bar"><div class="fill" id="progress-bar" data-tier="empty"></div></div>
      <p class="quote hidden" id="quote"></p>
    </section>

    <section class="card">
      <div class="calendar-nav">
        <button class="ghost" type="button" id="prev-month">&larr;</button>
        <h2 id="calendar-label"></h2>
        <button class="ghost" type="button" id="next-month">&rarr;</button>
      </div>
      <div class="calendar" id="calendar"></div>
    </section>

    <section class="card backup">
      <h2>Backup</h2>
      <div>
        <button class="ghost" type="button" id="export-btn">Export</button>
        <button class="ghost" type="button" id="import-btn">Import</button>
      </div>
      <textarea id="backup-text" placeholder="Exported data appears here; paste a backup to import it."></textarea>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const target = new Date(document.querySelector('.app').dataset.target).getTime();
    const statusEl = document.getElementById('status');
    const tasksEl = document.getElementById('tasks');
    const inputEl = document.getElementById('task-input');
    const progressText = document.getElementById('progress-text');
    const progressBar = document.getElementById('progress-bar');
    const quoteEl = document.getElementById('quote');
    const calendarEl = document.getElementById('calendar');
    const calendarLabel = document.getElementById('calendar-label');
    const backupText = document.getElementById('backup-text');

    const now = new Date();
    let calendarYear = now.getFullYear();
    let calendarMonth = now.getMonth() + 1;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const pad = (value) => value.toString().padStart(2, '0');

    const updateCountdown = () => {
      const distance = target - Date.now();
      const left = Math.max(distance, 0);
      document.getElementById('days').textContent = Math.floor(left / 86400000);
      document.getElementById('hours').textContent = pad(Math.floor((left % 86400000) / 3600000));
      document.getElementById('minutes').textContent = pad(Math.floor((left % 3600000) / 60000));
      document.getElementById('seconds').textContent = pad(Math.floor((left % 60000) / 1000));
    };

    const request = async (url, options) => {
      const res = await fetch(url, options);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res;
    };

    const renderTasks = (view) => {
      tasksEl.replaceChildren();
      if (!view.tasks.length) {
        const empty = document.createElement('div');
        empty.className = 'empty';
        empty.textContent = 'No tasks for today. Add one above!';
        tasksEl.appendChild(empty);
      }
      view.tasks.forEach((task) => {
        const row = document.createElement('div');
        row.className = task.completed ? 'task done' : 'task';

        const check = document.createElement('button');
        check.className = 'check';
        check.type = 'button';
        check.textContent = task.completed ? '✓' : '';
        check.addEventListener('click', () => mutate(`/api/tasks/${task.id}/toggle`, { method: 'POST' }));

        const text = document.createElement('span');
        text.className = 'text';
        text.textContent = task.text;

        const remove = document.createElement('button');
        remove.className = 'remove';
        remove.type = 'button';
        remove.textContent = '✕';
        remove.addEventListener('click', () => mutate(`/api/tasks/${task.id}`, { method: 'DELETE' }));

        row.append(check, text, remove);
        tasksEl.appendChild(row);
      });

      progressText.textContent = `${view.percent}%`;
      progressBar.style.width = `${view.percent}%`;
      progressBar.dataset.tier = view.tier;
    };

    const loadQuote = async () => {
      const data = await (await request('/api/motivation')).json();
      if (data.quote) {
        quoteEl.textContent = data.quote;
        quoteEl.classList.remove('hidden');
      } else {
        quoteEl.classList.add('hidden');
      }
    };

    const renderCalendar = async (offset = 0) => {
      const query = `year=${calendarYear}&month=${calendarMonth}&offset=${offset}`;
      const view = await (await request(`/api/calendar?${query}`)).json();
      calendarYear = view.year;
      calendarMonth = view.month;
      calendarLabel.textContent = view.label;
      calendarEl.replaceChildren();
      ['Sun', 'Mon', 'Tue', 'Wed', 'Thu', 'Fri', 'Sat'].forEach((name) => {
        const head = document.createElement('div');
        head.className = 'weekday';
        head.textContent = name;
        calendarEl.appendChild(head);
      });
      for (let i = 0; i < view.leading_blanks; i += 1) {
        calendarEl.appendChild(document.createElement('div'));
      }
      view.days.forEach((day) => {
        const cell = document.createElement('div');
        const classes = ['cell'];
        if (day.is_today) classes.push('today');
        else if (day.is_past) classes.push('past');
        cell.textContent = day.day;
        if (day.badge.kind === 'complete') {
          classes.push('complete');
          const badge = document.createElement('span');
          badge.className = 'badge';
          badge.textContent = '✓';
          cell.appendChild(badge);
        } else if (day.badge.kind === 'partial') {
          classes.push('partial');
          const badge = document.createElement('span');
          badge.className = 'badge';
          badge.textContent = `${day.badge.percent}%`;
          cell.appendChild(badge);
        }
        cell.className = classes.join(' ');
        calendarEl.appendChild(cell);
      });
    };

    const refresh = async () => {
      const view = await (await request('/api/tasks')).json();
      renderTasks(view);
      await Promise.all([renderCalendar(), loadQuote()]);
    };

    const mutate = (url, options) => {
      request(url, options)
        .then((res) => res.json())
        .then((view) => {
          renderTasks(view);
          return Promise.all([renderCalendar(), loadQuote()]);
        })
        .catch((err) => setStatus(err.message, 'error'));
    };

    document.getElementById('add-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const text = inputEl.value;
      inputEl.value = '';
      mutate('/api/tasks', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ text })
      });
    });

    const navigate = (delta) => {
      renderCalendar(delta).catch((err) => setStatus(err.message, 'error'));
    };

    document.getElementById('prev-month').addEventListener('click', () => navigate(-1));
    document.getElementById('next-month').addEventListener('click', () => navigate(1));

    document.getElementById('export-btn').addEventListener('click', () => {
      request('/api/export')
        .then((res) => res.text())
        .then((text) => {
          backupText.value = text;
          setStatus('Exported', 'ok');
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('import-btn').addEventListener('click', () => {
      request('/api/import', { method: 'POST', body: backupText.value })
        .then((res) => res.json())
        .then((data) => {
          if (!data.imported) {
            setStatus('Import failed: not a valid backup', 'error');
            return;
          }
          setStatus('Imported', 'ok');
          return refresh();
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    updateCountdown();
    setInterval(updateCountdown, 1000);
    refresh().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
